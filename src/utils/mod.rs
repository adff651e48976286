//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use command_activator::utils::display_terminal::print_boxed_title;
//!
//! print_boxed_title("Type Catalog Ready");
//! ```

pub mod display_terminal;
