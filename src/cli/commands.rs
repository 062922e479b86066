//! Command implementations

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::IndicatifProgressAdapter;
use crate::app::container::AppContainer;
use crate::app::ProbeResponse;
use crate::cli::args::{FetchArgs, ProbeArgs, SplitArgs};
use crate::config_initialization::Settings;
use crate::domain::model::*;
use crate::utils::Utils;

/// Execute the split command
pub async fn split(container: &dyn AppContainer, settings: &Settings, args: SplitArgs) -> Result<()> {
    let source = VideoSource::from_inputs(args.url.as_deref(), args.input.as_deref())?;

    let request = SplitRequest::new(
        source,
        args.output_dir,
        settings.chunk_duration,
        settings.scale.clone(),
        settings.format,
    )?
    .with_tail_policy(if args.include_tail {
        TailPolicy::Emit
    } else {
        TailPolicy::Drop
    })
    .with_failure_policy(if args.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::Abort
    })
    .with_overwrite(settings.overwrite);

    info!("Starting split operation");
    info!("Source: {}", request.source);
    info!("Output directory: {}", request.output_dir.display());
    info!(
        "Chunk: {}s, scale: {}, format: {}",
        request.chunk_duration, request.scale, request.format
    );

    let progress = if args.json || args.no_progress {
        IndicatifProgressAdapter::hidden()
    } else {
        IndicatifProgressAdapter::new()
    };

    let report = container
        .split_interactor()
        .execute(&request, &progress)
        .await
        .context("Clip generation failed")?;

    info!(
        "Split finished in {}",
        Utils::format_duration(Duration::from_secs_f64(report.elapsed_secs.max(0.0)))
    );

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize split report to JSON")?;
        println!("{}", json);
    } else {
        display_split_report(&report);
    }

    if !report.is_complete() {
        return Err(anyhow::anyhow!(
            "{} of {} clips failed",
            report.failures.len(),
            report.failures.len() + report.clip_count()
        ));
    }

    Ok(())
}

/// Execute the fetch command
pub async fn fetch(container: &dyn AppContainer, args: FetchArgs) -> Result<()> {
    info!("Starting fetch operation");
    let source = VideoSource::from_inputs(Some(&args.url), None)?;

    let path = container
        .fetch_interactor()
        .resolve(&source, &args.output_dir)
        .await
        .context("Download failed")?;

    println!("{}", path.display());
    Ok(())
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<()> {
    info!("Starting probe operation");

    let response = container
        .probe_interactor()
        .execute(&args.input, args.chunk_duration)
        .await
        .context("Failed to probe input file")?;

    if args.json {
        let json = serde_json::to_string_pretty(&response)
            .context("Failed to serialize probe result to JSON")?;
        println!("{}", json);
    } else {
        display_probe_response(&response);
    }

    Ok(())
}

/// Display split result in human-readable format
fn display_split_report(report: &SplitReport) {
    println!(
        "Generated {} clips in {}",
        report.clip_count(),
        report.output_dir.display()
    );

    for failure in &report.failures {
        eprintln!(
            "  {} failed: {}",
            chunk_file_name(failure.index, report.format),
            failure.message
        );
    }
}

/// Display probe result in human-readable format
fn display_probe_response(response: &ProbeResponse) {
    println!("File: {}", response.path.display());
    println!(
        "Duration: {:.3}s ({})",
        response.duration.seconds, response.duration
    );
    if let Some(size) = response.file_size {
        println!("File Size: {}", Utils::format_file_size(size));
    }
    if let (Some(chunk), Some(count)) = (response.chunk_duration, response.full_chunks) {
        println!("Full {}s clips: {}", chunk, count);
    }
}
