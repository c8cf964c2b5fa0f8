//! # hangdash - Main Entry Point
//!
//! Retrieves a hang profile from a local fragment mirror, rebuilds the date
//! graph for one thread and stack on the background worker, and prints it
//! (optionally exporting it as JSON).

use anyhow::{Context, Result};
use clap::Parser;
use hangdash::analysis::StackSelection;
use hangdash::cli::Args;
use hangdash::export::{export_date_graph, render_children, render_date_graph, DateGraphReport, DateRange};
use hangdash::retrieval::{retrieve_profile, DirectorySource, ProfileRequest};
use hangdash::worker::{DateGraphWorker, WorkerRequest, WorkerResponse};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    let msg = err.to_string().to_lowercase();
    if msg.contains("out of range") || msg.contains("outside the stack table") {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;

    let request = ProfileRequest {
        duration_spec: args.duration.clone(),
        historical: args.historical,
        payload_id: args.payload_id.clone(),
    };
    let source = Arc::new(DirectorySource::new(&args.dir));

    let mut profile = retrieve_profile(source, &args.base_url, &request)
        .await
        .context("error receiving profile")?;

    if !quiet {
        println!("hangdash v{}", env!("CARGO_PKG_VERSION"));
        if let Some(ref uuid) = profile.uuid {
            println!("profile: {uuid}");
        }
        println!("threads: {}", profile.threads.len());
        println!("dates: {}", profile.dates.len());
    }

    if args.thread >= profile.threads.len() {
        anyhow::bail!("thread index {} out of range ({} threads)", args.thread, profile.threads.len());
    }
    let thread = Arc::new(profile.threads.swap_remove(args.thread));
    let selection = StackSelection::from(args.stack);

    // ── Rebuild the date graph off the main thread ──────────────────────
    let worker = DateGraphWorker::spawn().context("Failed to start date graph worker")?;
    worker.request(WorkerRequest::SetWorkerInformation { worker_index: 0, num_workers: 1 })?;
    let response =
        worker.request(WorkerRequest::RebuildDateGraph { thread: Arc::clone(&thread), selected_stack: selection })?;
    worker.shutdown();

    let graph = match response {
        WorkerResponse::DateGraphRebuilt { graph, .. } => graph,
        WorkerResponse::DateGraphFailed(e) => return Err(e.into()),
        other => anyhow::bail!("unexpected worker response: {other:?}"),
    };
    info!("Date graph rebuilt over {} days", graph.len());

    if !quiet {
        let name = thread.name.as_deref().unwrap_or("<unnamed>");
        match selection {
            StackSelection::All => println!("thread: {name}, all stacks"),
            StackSelection::Stack(stack) => {
                let func = thread.func_name(stack).unwrap_or("<unknown>");
                println!("thread: {name}, stack [{stack}] {func}");
            }
        }
        println!();
    }

    let range = args.range.or_else(|| DateRange::full(profile.dates.len()));
    if let Some(range) = range {
        for line in render_date_graph(&profile.dates, &graph, range) {
            println!("{line}");
        }
    }

    if args.children {
        println!();
        println!("children:");
        for line in render_children(&thread, selection) {
            println!("{line}");
        }
    }

    if let Some(ref export_path) = args.export {
        let file = File::create(export_path).context("Failed to create date graph output file")?;
        let report = DateGraphReport::new(&profile, &thread, selection, &graph);
        export_date_graph(BufWriter::new(file), &report).context("Failed to export date graph")?;
        if !quiet {
            println!("saved: {}", export_path.display());
        }
    }

    Ok(())
}
