//! 터미널 출력 포맷팅 유틸리티
//!
//! 타입 카탈로그 워밍업 과정에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 상태 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// # Examples
///
/// ```rust,ignore
/// print_boxed_title("🔄 WARMING UP TYPE CATALOG");
/// ```
///
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║            🔄 WARMING UP TYPE CATALOG            ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Validating registered types
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료와 처리된 항목 수를 표시합니다
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 들여쓰기된 트리 구조로 하위 작업의 상태를 출력합니다
///
/// ```text
///    ├─ PingModule: ✓ 2 parameters, 1 properties
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 워밍업 완료 요약을 출력합니다
///
/// # Arguments
///
/// * `validated` - 생성자 검증에 성공한 타입 수
/// * `failed` - 검증에 실패한 타입 수
pub fn print_final_summary(validated: usize, failed: usize) {
    let total = validated + failed;
    println!();
    print_boxed_title("🎉 TYPE CATALOG READY");
    println!("   ✅ Validated: {}", validated);
    println!("   ❌ Failed: {}", failed);
    println!("   📦 Total Types: {}", total);
    println!();
}
