use anyhow::Result;

use pos_sim::clock::SystemClock;
use pos_sim::config::Config;
use pos_sim::logging::{self, LogRotator};
use pos_sim::pos::{self, BackendKind, Order, Product};

fn main() -> Result<()> {
    let config = Config::load()?;
    config.ensure_directories()?;

    // Rotate before the active log is opened
    let report = LogRotator::new(config.logging.clone(), SystemClock).run()?;

    let (log_file_info, guard) = logging::init_file_logging(&config.logging)?;
    report.log_summary();
    tracing::info!("Logging to: {}", log_file_info.path.display());

    let order = Order::new(config.demo.order_kind);
    let product = Product::new(config.demo.product_name.clone(), config.demo.product_price());
    let source = pos::success_source(config.pos.seed);

    for kind in BackendKind::ALL {
        let backend = kind.create_backend(source.clone());
        let outcome = pos::process_order_through_pos(backend.as_ref(), &order, &product);
        println!("{}", outcome.to_json()?);
    }

    guard.shutdown()
}
