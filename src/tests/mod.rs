mod region_code;
mod shortnumberinfo_tests;
mod test_metadata;

static ONCE: std::sync::Once = std::sync::Once::new();

/// Colored trace output for every test in the crate. `RUST_LOG` overrides the
/// level.
fn init_logger() {
    ONCE.call_once(|| {
        colog::default_builder()
            .parse_env(env_logger::Env::default().default_filter_or("trace"))
            .init()
    });
}
