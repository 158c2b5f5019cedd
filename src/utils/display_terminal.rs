//! 터미널 출력 포맷팅 유틸리티
//!
//! 애플리케이션 부팅 과정(디스크립터 빌드, 데모 데이터 적재)에서 사용되는
//! 터미널 출력 함수들을 제공합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// 텍스트는 50칸 박스 안에서 중앙 정렬됩니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║          📐 BUILDING ENTITY DESCRIPTORS          ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
///
/// ```text
/// → Step 1: Building descriptors
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료와 처리된 항목 수를 표시합니다
///
/// ```text
/// ✓ Step 1: Descriptors built (10 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 트리 형태로 표시합니다
///
/// ```text
///    ├─ post: ✓ 12 fields
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 부팅 완료 요약을 출력합니다
///
/// # Arguments
///
/// * `descriptors` - 빌드된 엔티티 디스크립터 수
/// * `seeded` - 적재된 데모 레코드 수
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║              🎉 BLOG BACKEND READY               ║
/// ╚══════════════════════════════════════════════════╝
///    📐 Descriptors: 10
///    🌱 Seeded records: 14
/// ```
pub fn print_final_summary(descriptors: usize, seeded: usize) {
    println!();
    print_boxed_title("🎉 BLOG BACKEND READY");
    println!("   📐 Descriptors: {}", descriptors);
    println!("   🌱 Seeded records: {}", seeded);
    println!();
}

/// 캐시가 채워졌음을 서브 작업 형태로 표시합니다
///
/// ```text
///    ├─ Descriptor Cache: 10 entries loaded
/// ```
pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}
