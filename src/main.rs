use anyhow::Context;
use clap::{Parser, Subcommand};
use rockbands_client::utils::{logger, validation::Validate};
use rockbands_client::{
    BindValidators, CheckboxPopulator, ClientConfig, Document, FixedYear, Form, FormKind,
    FormValidator, HttpBandSource, PageInit, PopulateCheckboxes, SubmitOutcome, TomlConfig,
    YearPolicy, CHECKBOX_CONTAINER_ID,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "rockbands")]
#[command(about = "Client-side form checks and band checkbox rendering for the rock bands catalogue")]
struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a form's submit checks against the given field values
    Validate {
        #[arg(long, help = "band, album or member")]
        form: FormKind,

        #[arg(long = "field", value_parser = parse_field, help = "Input value as name=value")]
        fields: Vec<(String, String)>,

        #[arg(long, help = "Let non-numeric years through")]
        lenient_years: bool,

        #[arg(long, help = "Override the current year")]
        current_year: Option<i32>,
    },
    /// Fetch the band list and print the rendered checkbox container
    Checkboxes {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        bands_path: Option<String>,

        #[arg(long)]
        timeout_seconds: Option<u64>,

        #[arg(long = "check", help = "Band id to tick after rendering")]
        check: Vec<String>,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    match cli.command {
        Command::Validate {
            form,
            fields,
            lenient_years,
            current_year,
        } => {
            let policy = if lenient_years {
                YearPolicy::Lenient
            } else {
                YearPolicy::Strict
            };
            let validator = match current_year {
                Some(year) => FormValidator::with_clock(policy, Arc::new(FixedYear(year))),
                None => FormValidator::new(policy),
            };

            let inputs = fields
                .into_iter()
                .fold(Form::new(), |form, (name, value)| form.with_input(name, value));
            let mut page = Document::new().with_form(form.form_id(), inputs);

            PageInit::new()
                .with_step(BindValidators::new(validator))
                .run(&mut page)
                .await;

            match page.submit(form.form_id()) {
                Some(SubmitOutcome::Proceed) => println!("ok"),
                Some(SubmitOutcome::Blocked { message }) => {
                    println!("{}", message);
                    std::process::exit(1);
                }
                None => anyhow::bail!("form {} is not mounted", form.form_id()),
            }
        }
        Command::Checkboxes {
            config,
            base_url,
            bands_path,
            timeout_seconds,
            check,
        } => {
            let mut client_config = match config {
                Some(path) => TomlConfig::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?
                    .into_client_config(),
                None => ClientConfig::default(),
            };
            if let Some(url) = base_url {
                client_config.base_url = url;
            }
            if let Some(path) = bands_path {
                client_config.bands_path = path;
            }
            if let Some(secs) = timeout_seconds {
                client_config.timeout_seconds = secs;
            }

            if let Err(e) = client_config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }

            let source = HttpBandSource::from_config(&client_config)?;
            tracing::info!("Loading bands from {}", source.url());

            let mut page = Document::new().with_container(CHECKBOX_CONTAINER_ID);
            PageInit::new()
                .with_step(PopulateCheckboxes::new(CheckboxPopulator::new(source)))
                .run(&mut page)
                .await;

            let container = page
                .container_entry(CHECKBOX_CONTAINER_ID)
                .context("checkbox container missing after page init")?;
            for id in &check {
                if !container.set_checked(id) {
                    tracing::warn!("No checkbox for band id {}", id);
                }
            }
            tracing::debug!("Checked band ids: {:?}", container.checked_values());

            println!("{}", container.to_html());
        }
    }

    Ok(())
}
