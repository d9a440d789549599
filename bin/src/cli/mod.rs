use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pipeline::{
    Config, ExtractionRequest, output_csv,
    tabula_wrapper::singlethreaded::SingleThreadedTabulaExtractor,
};
use simplelog::LevelFilter;

/// Converts the transaction details in an EquatePlus statement PDF to a CSV file.
#[derive(Debug, Parser)]
struct Args {
    /// Path to the input statement PDF.
    #[arg(long)]
    pdf: PathBuf,

    /// Path to write the output CSV file to.
    #[arg(long)]
    output: PathBuf,

    /// Path to the Tabula Java library JAR.
    #[arg(long)]
    tabula_libpath: String,

    /// Path to a YAML configuration file. Defaults are used for anything not set in it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Currency code that marks a net proceeds entry as cash rather than units. Overrides the
    /// configuration file.
    #[arg(long)]
    home_currency: Option<String>,

    /// Logging level.
    #[arg(long, default_value = "Info")]
    log_level: LevelFilter,
}

impl Args {
    /// Loads the configuration and applies overrides from the command line.
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())?;
        if let Some(home_currency) = &self.home_currency {
            config.home_currency = home_currency.clone();
        }
        Ok(config)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .with_context(|| "configuring logging")?;

    log::info!("Starting conversion of {:?}.", args.pdf);

    let config = args.load_config()?;

    let vm = tabula::TabulaVM::new(&args.tabula_libpath, false)?;
    let env = vm.attach().with_context(|| "attaching to TabulaVM")?;
    let extractor = SingleThreadedTabulaExtractor::new(env);

    let request = ExtractionRequest::new(&args.pdf, &config);
    let records = pipeline::convert_pdf(&extractor, &request, &config)?;

    log::info!(
        "Saving {} transactions to {:?}.",
        records.len(),
        args.output
    );
    output_csv::write_records_to_path(&args.output, &records)?;

    log::info!("Finished.");
    Ok(())
}
