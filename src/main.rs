use anyhow::{Context, Result};
use article_crew::cli::commands::{
    GenerateCommand, ModelsCommand, ServeCommand, ValidateCrewCommand,
};
use article_crew::cli::output::*;
use article_crew::cli::{Cli, Command};
use article_crew::{
    ArticleService, CrewConfig, ExecutionEvent, GenerateError, GenerateRequest, Settings,
};
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("article_crew={0},tower_http={0}", default_level))
    });
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let settings = cli.provider.to_settings();

    // Execute command
    match &cli.command {
        Command::Serve(cmd) => serve(cmd, settings, load_crew(&cli)?).await?,
        Command::Generate(cmd) => generate(cmd, settings, load_crew(&cli)?).await?,
        Command::Models(cmd) => list_models(cmd, &settings)?,
        Command::ValidateCrew(cmd) => validate_crew(cmd)?,
    }

    Ok(())
}

fn load_crew(cli: &Cli) -> Result<CrewConfig> {
    match &cli.crew {
        Some(path) => CrewConfig::from_file(path).context("Failed to load crew config"),
        None => CrewConfig::builtin(),
    }
}

async fn serve(cmd: &ServeCommand, settings: Settings, crew: CrewConfig) -> Result<()> {
    if !settings.has_credential() {
        println!(
            "{} OPENROUTER_API_KEY is not set; the page will ask for it on every run",
            WARN
        );
    }
    println!(
        "{} Serving {} on {}",
        ROCKET,
        style(&crew.name).bold(),
        style(format!("http://{}", cmd.bind)).cyan()
    );

    let service = ArticleService::openrouter(settings, crew);
    article_crew::web::serve(cmd.bind, service).await
}

async fn generate(cmd: &GenerateCommand, settings: Settings, crew: CrewConfig) -> Result<()> {
    let service = ArticleService::openrouter(settings, crew);
    let request = GenerateRequest::new(cmd.topic.clone(), cmd.model.clone());

    let spinner = create_spinner("AI agents are working on your article...");
    let progress = spinner.clone();
    let result = service
        .generate_observed(&request, move |event| {
            if let ExecutionEvent::TaskStarted { role, .. } = &event {
                progress.set_message(format!("{} is working...", role));
            }
            progress.println(format_execution_event(&event));
        })
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(result) => {
            match &cmd.output {
                Some(path) => {
                    std::fs::write(path, &result.content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "\n{} Article written to {}",
                        CHECK,
                        style(path.display()).bold()
                    );
                }
                None => println!("\n{}", result.content),
            }
            println!(
                "{} {} in {} ({} tokens)",
                INFO,
                style(&result.model).cyan(),
                format_duration(Duration::from_millis(result.elapsed_ms)),
                result.usage.total_tokens
            );
            Ok(())
        }
        Err(GenerateError::Validation(e)) => {
            println!("{} {}", WARN, style(e).yellow());
            std::process::exit(2);
        }
        Err(e) => {
            println!("\n{} {}", CROSS, style("Article generation failed").red());
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn list_models(cmd: &ModelsCommand, settings: &Settings) -> Result<()> {
    if cmd.json {
        let data = serde_json::json!({
            "models": settings.models,
            "default": settings.default_model(),
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Available models:", INFO);
    for model in &settings.models {
        if model == settings.default_model() {
            println!("  {} {}", style(model).bold(), style("(default)").dim());
        } else {
            println!("  {}", model);
        }
    }
    Ok(())
}

fn validate_crew(cmd: &ValidateCrewCommand) -> Result<()> {
    println!("{} Validating crew...", INFO);

    match CrewConfig::from_file(&cmd.file) {
        Ok(config) => {
            println!("{} Crew configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Agents: {}", style(config.agents.len()).cyan());
            println!("  Tasks: {}", style(config.tasks.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}
