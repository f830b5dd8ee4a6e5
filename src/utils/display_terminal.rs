//! 기동 과정 터미널 출력
//!
//! 레지스트리 초기화와 인덱스 준비 단계를 사람이 읽기 쉬운 형태로 출력합니다.
//! 로그 레벨과 무관하게 항상 표준 출력으로 나갑니다.

const BOX_WIDTH: usize = 52;

/// 상자 형태의 제목
pub fn print_banner(title: &str) {
    let border = "═".repeat(BOX_WIDTH);
    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_phase_start(phase: u8, description: &str) {
    println!("→ Phase {}: {}", phase, description);
}

pub fn print_phase_done(phase: u8, description: &str, count: usize) {
    println!("✓ Phase {}: {} ({} components)", phase, description, count);
}

pub fn print_component(name: &str, status: &str) {
    println!("   ├─ {:<28} {}", name, status);
}

pub fn print_lookup_table(kind: &str, count: usize) {
    println!("   ├─ {} lookup table: {} entries", kind, count);
}

/// 레지스트리 초기화 결과 요약
pub fn print_registry_summary(repositories: usize, services: usize) {
    println!();
    print_banner("DEAL-FLOW REGISTRY READY");
    println!("   repositories : {}", repositories);
    println!("   services     : {}", services);
    println!("   total        : {}", repositories + services);
    println!();
}

/// 컬렉션 인덱스 준비 결과
pub fn print_index_report(collection: &str, ok: bool) {
    let mark = if ok { "✓" } else { "✗" };
    println!("   {} indexes on {}", mark, collection);
}
