mod cli;

use medialoop::{
    config,
    ops::{self, MediaContext, SyncPlan},
};
use medialoop_av::{probe_media, ToolRegistry};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "medialoop=trace,medialoop_av=debug".to_string()
        } else {
            "medialoop=info,medialoop_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::LoopDuration {
            source,
            dest,
            minutes,
        } => {
            let ctx = context(cli.config.as_deref())?;
            let looped = ops::prepare_loop_to_duration(&ctx, &source, minutes)?;
            println!(
                "Looped {} times to {:.3} seconds",
                looped.repetitions,
                looped.looped_secs()
            );
            let report = looped.export(&ctx, &dest)?;
            println!("Looped track exported: {}", report.destination.display());
            Ok(())
        }
        Commands::LoopTimes {
            source,
            dest,
            repetitions,
        } => {
            let ctx = context(cli.config.as_deref())?;
            let looped = ops::prepare_loop_n_times(&ctx, &source, repetitions)?;
            println!("Original duration: {} seconds", looped.original_secs);
            println!("Duration after looping: {} seconds", looped.looped_secs());
            let report = looped.export(&ctx, &dest)?;
            println!("Looped track exported: {}", report.destination.display());
            Ok(())
        }
        Commands::SyncVideo { video, audio, dest } => {
            let ctx = context(cli.config.as_deref())?;
            let report = ops::sync_video_to_audio(&ctx, &video, &audio, &dest)?;
            match report.plan {
                SyncPlan::Trim { end } => println!(
                    "Trimmed {:.3}s video to {:.3}s",
                    report.video_secs, end
                ),
                SyncPlan::Loop { duration } => println!(
                    "Looped {:.3}s video to {:.3}s",
                    report.video_secs, duration
                ),
            }
            println!("Synced video exported: {}", report.destination.display());
            Ok(())
        }
        Commands::Concat {
            base,
            output,
            names,
        } => {
            let ctx = context(cli.config.as_deref())?;
            let report = ops::concat_tracks(&ctx, &base, names.as_slice(), &output)?;
            println!(
                "Joined {} tracks ({:.3} seconds)",
                report.inputs.len(),
                report.total_secs
            );
            println!("Joined track exported: {}", report.destination.display());
            Ok(())
        }
        Commands::Probe { file, json } => probe_file(&file, json, cli.config.as_deref()),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("medialoop {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn context(config_path: Option<&Path>) -> Result<MediaContext> {
    let config = config::load_config_or_default(config_path)?;
    Ok(MediaContext::from_config(&config))
}

fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let ctx = context(config_path)?;
    let info = probe_media(&ctx.tools, file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File: {}", info.file_path.display());
    println!("Container: {}", info.container);
    let ms = info.duration.as_millis();
    println!(
        "Duration: {:02}:{:02}:{:02}.{:03} ({} ms)",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000,
        ms
    );
    match &info.audio {
        Some(a) => println!("Audio: {} {} Hz {}ch", a.codec, a.sample_rate, a.channels),
        None => println!("Audio: none"),
    }
    match &info.video {
        Some(v) => println!("Video: {} {}x{}", v.codec, v.width, v.height),
        None => println!("Video: none"),
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to enable all commands.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let show = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "PATH".to_string())
    };
    println!("  ffmpeg: {}", show(&config.tools.ffmpeg_path));
    println!("  ffprobe: {}", show(&config.tools.ffprobe_path));
    println!("  MP3 bitrate: {}", config.audio.mp3_bitrate);
    if let Some(rate) = config.audio.sample_rate {
        println!("  Decode sample rate: {} Hz", rate);
    }
    if let Some(channels) = config.audio.channels {
        println!("  Decode channels: {}", channels);
    }
    println!(
        "  Video codecs: {}/{}",
        config.video.video_codec, config.video.audio_codec
    );

    Ok(())
}
