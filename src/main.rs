use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartcast::cli::{Cli, Commands};
use smartcast::config::Config;
use smartcast::digest::{DigestOptions, DigestPipeline};
use smartcast::ingest::DocumentIngestor;
use smartcast::media::YoutubeDownloader;
use smartcast::paper::StructuringEngine;
use smartcast::podcast::{PodcastStyle, PodcastSynthesizer};
use smartcast::services::{HttpQaService, HttpSummarizer, QaService, ServiceClient};
use smartcast::{output, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "smartcast=debug"
    } else {
        "smartcast=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Paper {
            input,
            style,
            output,
            format,
        } => {
            let config = Config::load(cli.config.as_deref()).await?;

            let ingestor = DocumentIngestor::new(&config)?;
            let document = ingestor.load(&input).await?;
            tracing::info!("Structuring document from {}", document.origin);

            let engine = StructuringEngine::new();
            let paper = engine.build(&document.text)?;

            let client = ServiceClient::new(&config.services)?;
            let summarizer =
                HttpSummarizer::new(client, config.services.summarization_model.clone());
            let synthesizer = PodcastSynthesizer::new(Box::new(summarizer));

            let style = style.unwrap_or_else(|| config.app.default_style.clone());
            let episode = synthesizer.create_podcast(&paper, &style).await?;

            match output {
                Some(path) => {
                    output::save_to_file(&episode, &path, &format).await?;
                    println!("Episode saved to: {}", path.display());
                }
                None => output::print_to_console(&episode, &format)?,
            }
        }
        Commands::Digest {
            input,
            translate_to,
            narrate,
            voice,
            save_audio,
            output,
            format,
        } => {
            let config = Config::load(cli.config.as_deref()).await?;

            // Check for required external dependencies (non-fatal)
            if YoutubeDownloader::is_youtube_url(&input) {
                let missing_deps = utils::check_dependencies().await;
                if !missing_deps.is_empty() {
                    eprintln!("⚠️  Dependency check warnings:");
                    for dep in missing_deps {
                        eprintln!("   • {}", dep);
                    }
                    eprintln!("   (Continuing anyway - tools may be available)");
                }
            }

            let pipeline = DigestPipeline::new(&config)?;
            let options = DigestOptions {
                translate_to,
                narrate,
                voice,
                keep_audio: save_audio || config.app.keep_audio,
            };

            tracing::info!("Starting digest for: {}", input);
            let report = pipeline.digest(&input, &options).await?;

            match output {
                Some(path) => {
                    output::save_to_file(&report, &path, &format).await?;
                    println!("Digest saved to: {}", path.display());
                    if let Some(narration) = &report.narration_path {
                        println!("Narration saved to: {}", narration.display());
                    }
                    if let Some(audio) = &report.audio_path {
                        println!("Audio saved to: {}", audio.display());
                    }
                }
                None => output::print_to_console(&report, &format)?,
            }
        }
        Commands::Ask { context, question } => {
            let config = Config::load(cli.config.as_deref()).await?;

            utils::check_file_accessible(&context)?;
            let text = fs_err::read_to_string(&context)?;

            let client = ServiceClient::new(&config.services)?;
            let qa = HttpQaService::new(client, config.services.qa_model.clone());

            tracing::info!("Answering question against {}", context.display());
            let answer = qa.answer(&question, &text).await?;

            println!("Answer: {}", answer.answer);
            println!("Confidence: {:.2}", answer.score);
        }
        Commands::Styles => {
            println!("Available podcast styles:");
            for style in PodcastStyle::ALL {
                println!("  • {} - {}", style, style.blurb());
            }
        }
        Commands::Config { show } => {
            let config = Config::load(cli.config.as_deref()).await?;
            if show {
                config.display();
            } else {
                println!("Configuration file:");
                println!("  {}", Config::config_path()?.display());
                println!("Edit it to change service endpoints, models, and defaults.");
            }
        }
    }

    Ok(())
}
