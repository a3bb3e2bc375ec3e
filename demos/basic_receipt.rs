use chrono::Local;
use quittung::{Biller, BillingConfig, InvoiceRecordBuilder, PaymentMode};
use rust_decimal_macros::dec;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quittung=info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();

    // A `billing.toml` next to the binary overrides the defaults.
    let config = match BillingConfig::from_file("billing.toml") {
        Ok(config) => config,
        Err(e) => {
            tracing::info!(error = %e, "using default configuration");
            BillingConfig::default()
        }
    };
    let biller = Biller::new(config);

    let record = InvoiceRecordBuilder::new(
        "Aarav Shah",
        "Playgroup",
        "12 months",
        Local::now().date_naive(),
    )
    .add_line("Admission Fee", dec!(5000))
    .add_line("Tuition Fee", dec!(12000))
    .add_line("Activity Charges", dec!(1500))
    .payment_mode(PaymentMode::Upi)
    .balance(dec!(2500))
    .destination(biller.config().default_output_dir())
    .build()
    .expect("record should be valid");

    match biller.generate_invoice(record) {
        Ok(path) => println!("Receipt saved to {}", path.display()),
        Err(e) => {
            eprintln!("Could not generate receipt: {e}");
            std::process::exit(1);
        }
    }
}
