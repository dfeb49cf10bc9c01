//! 터미널 출력 포맷팅 유틸리티
//!
//! 서버 기동 과정(레지스트리 초기화, 바인딩 정보)을 박스 형태로 출력합니다.

const BOX_WIDTH: usize = 52;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 서버 바인딩 정보와 주요 엔드포인트를 출력합니다.
pub fn print_server_banner(bind_address: &str, storage_backend: &str, cache_enabled: bool) {
    print_boxed_title("🧑‍💼 RECRUTEMENT BACKEND");
    println!("   🌐 http://{}", bind_address);
    println!("   ❤️  Health: http://{}/health", bind_address);
    println!("   📂 Upload store: {}", storage_backend);
    println!("   ⚡ Redis cache: {}", if cache_enabled { "enabled" } else { "disabled" });
    println!();
}
