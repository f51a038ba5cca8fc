//! dbtools-gen - Kotlin/Java data-access generator
//!
//! Reads a `dbSchema` XML description and writes the Kotlin or Java records,
//! managers and database lifecycle classes for the dbtools Android runtime.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use dbtools_codegen::generators::android::AndroidGenerator;
use dbtools_codegen::generators::{DateType, GeneratorConfig, Language};
use dbtools_codegen::utils::write_sources;
use dbtools_codegen::CodeGenerator;
use dbtools_schema::sqlite;

mod logging;

/// Generate Kotlin or Java data-access sources from a dbtools schema
#[derive(Debug, Parser)]
#[command(name = "dbtools-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate Kotlin or Java sources
    Generate(GenerateArgs),

    /// Parse and validate a schema without writing anything
    Validate(ValidateArgs),

    /// Print the SQLite DDL of a database
    Sql(SqlArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Schema XML file
    #[arg(short, long, default_value = "schema.xml")]
    schema: PathBuf,

    /// Root directory of the generated sources
    #[arg(short, long)]
    output: PathBuf,

    /// Base package of the generated classes
    #[arg(short, long)]
    package: String,

    /// JSON file with generator options (camelCase keys)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Add the database name as a package segment
    #[arg(long)]
    include_database_name: bool,

    /// Extend the RxJava flavoured base managers
    #[arg(long)]
    rx_java: bool,

    /// Annotate non-null getters with @Nonnull
    #[arg(long)]
    jsr305: bool,

    /// Generate injectable managers instead of a holder object
    #[arg(long)]
    injection: bool,

    /// Build view and query SQL with SQLQueryBuilder
    #[arg(long)]
    sql_query_builder: bool,

    /// Date library: JAVA_DATE, JODA or JSR_310
    #[arg(long)]
    date_type: Option<DateType>,

    /// Output language: kotlin or java
    #[arg(short, long)]
    language: Option<Language>,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl GenerateArgs {
    /// Options from the config file, with flags switched on from the command line.
    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_json_file(path)?,
            None => GeneratorConfig::default(),
        };
        config.include_database_name_in_package |= self.include_database_name;
        config.rx_java_support |= self.rx_java;
        config.jsr305_support |= self.jsr305;
        config.injection_support |= self.injection;
        config.sql_query_builder_support |= self.sql_query_builder;
        if let Some(date_type) = self.date_type {
            config.date_type = date_type;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        Ok(config)
    }

    fn execute(self) -> anyhow::Result<()> {
        let config = self.generator_config()?;
        if self.print_config {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        let language = config.language;
        let codegen = load(&self.schema)?;
        let output = codegen
            .generate(AndroidGenerator::new(self.package.as_str(), config))
            .with_context(|| format!("generating {language} sources"))?;
        let report = write_sources(&self.output, &output.files)?;

        tracing::info!(
            output = %self.output.display(),
            %language,
            written = report.written.len(),
            kept = report.skipped.len(),
            "generation complete"
        );
        if !report.is_success() {
            bail!("{} file(s) could not be written", report.failed.len());
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema XML file
    #[arg(default_value = "schema.xml")]
    schema: PathBuf,
}

impl ValidateArgs {
    fn execute(self) -> anyhow::Result<()> {
        let codegen = load(&self.schema)?;
        for database in &codegen.schema().databases {
            println!(
                "{}: {} tables, {} views, {} queries",
                database.name,
                database.tables.len(),
                database.views.len(),
                database.queries.len()
            );
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
struct SqlArgs {
    /// Schema XML file
    #[arg(short, long, default_value = "schema.xml")]
    schema: PathBuf,

    /// Database to print; the first one when omitted
    #[arg(short, long)]
    database: Option<String>,

    /// Prefix the DDL with DROP statements
    #[arg(long)]
    drops: bool,
}

impl SqlArgs {
    fn execute(self) -> anyhow::Result<()> {
        let codegen = load(&self.schema)?;
        let schema = codegen.schema();
        let database = match &self.database {
            Some(name) => schema
                .database(name)
                .with_context(|| format!("no database named {name}"))?,
            None => schema
                .databases
                .first()
                .context("schema declares no database")?,
        };
        print!("{}", sqlite::database_schema(database, self.drops));
        Ok(())
    }
}

fn load(path: &Path) -> anyhow::Result<CodeGenerator> {
    let codegen = CodeGenerator::from_schema_file(path)?;
    tracing::debug!(schema = %path.display(), "schema loaded");
    Ok(codegen)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.json_logs).context("initializing logging")?;

    match cli.command {
        Command::Generate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Sql(args) => args.execute(),
    }
}
