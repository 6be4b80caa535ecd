// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll a simulated page of columns and log each visibility milestone.
//!
//! Run:
//! - `cargo run -p understory_reveal_demos --example columns`
//! - `RUST_LOG=understory_reveal=trace cargo run -p understory_reveal_demos --example columns -- --report middle,bottom`

use clap::Parser;
use tracing_subscriber::EnvFilter;
use understory_reveal::{MalformedGeometry, Milestones, RevealConfig, RevealTracker, TracingSink};
use understory_reveal_demos::Page;

#[derive(Parser, Debug)]
#[command(about = "Log visibility milestones while scrolling a page of columns")]
struct Args {
    /// Viewport height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    viewport: f64,
    /// Distance scrolled per simulated scroll event.
    #[arg(long, default_value_t = 120.0)]
    step: f64,
    /// Milestones to report, separated by `,` or `|`.
    #[arg(long, default_value = "top,middle,bottom")]
    report: String,
    /// Swap the edges of upside-down measurements instead of dropping them.
    #[arg(long)]
    normalize: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let report = Milestones::try_parse_list(&args.report).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to reporting every milestone");
        Milestones::all()
    });
    let malformed = if args.normalize {
        MalformedGeometry::Normalize
    } else {
        MalformedGeometry::Exclude
    };
    let config = RevealConfig::default()
        .with_report(report)
        .with_malformed(malformed);

    let page = Page::demo();
    let mut tracker = RevealTracker::with_config("column", config);
    let mut sink = TracingSink;

    tracker.init(&page, &args.viewport, &mut sink);

    let end = (page.height() - args.viewport).max(0.0);
    let step = args.step.max(1.0);
    let offsets = (1..)
        .map(|i| f64::from(i) * step)
        .take_while(|offset| *offset < end + step);
    tracker.run(offsets.map(|offset| offset.min(end)), &args.viewport, &mut sink);

    let info = tracker.debug_info();
    tracing::info!(
        tracked = info.tracked,
        excluded = info.excluded,
        completed = info.completed,
        "done scrolling"
    );
}
