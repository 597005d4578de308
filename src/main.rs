use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use godhead::{GodRecipe, Godhead, LoggingSupervisor, Options, OverrideRegistry, RecipeKind};

// ============================================================================
// Demo: build and submit one mongrel recipe
// ============================================================================

struct MongrelRecipe;

impl RecipeKind for MongrelRecipe {
    fn type_ident() -> &'static str {
        "MongrelRecipe"
    }

    fn defaults() -> Options {
        GodRecipe::defaults().merged(
            Options::new()
                .with("stop_command", "mongrel_rails stop")
                .with("start_grace_time", 20),
        )
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,godhead=debug")),
        )
        .init();

    tracing::info!("🚀 Building a mongrel watch definition");

    // === 1. Populate the per-recipe override registry ===
    // Everything registered under "mongrel" applies to every mongrel
    // instance created afterwards.
    let mut registry = OverrideRegistry::new();
    registry.register(
        "mongrel",
        Options::new()
            .with("uid", "deploy")
            .with("max_mem_usage", 157_286_400u64),
    );

    // === 2. Wire the supervisor boundary ===
    let demo_root = std::env::temp_dir().join("godhead-demo");
    let godhead = Godhead::new(registry, LoggingSupervisor);

    // === 3. Create one recipe instance ===
    let recipe = godhead.create::<MongrelRecipe>(
        Options::new()
            .with("start_command", "mongrel_rails start -p 8000 -d")
            .with("port", 8000)
            .with(
                "process_log_dir",
                demo_root.join("log").to_string_lossy().as_ref(),
            )
            .with("pid_dir", demo_root.join("run").to_string_lossy().as_ref()),
    )?;

    tracing::info!("✅ Recipe created: {}", recipe.handle());
    tracing::info!("   start:   {}", recipe.start_command());
    tracing::info!("   stop:    {:?}", recipe.stop_command());
    tracing::info!("   restart: {:?}", recipe.restart_command());
    tracing::info!("   group:   {}", recipe.watch().group);

    Ok(())
}
