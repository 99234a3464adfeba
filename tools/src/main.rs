//! prep-runner: headless runner for the offer-analytics preparation pipeline.
//!
//! Usage:
//!   prep-runner --data-dir ./data
//!   prep-runner --data-dir ./data --out merged.jsonl
//!   prep-runner gen --data-dir ./data --seed 42 --profiles 500 --events 5000

mod gen;

use anyhow::Result;
use offerprep_core::{
    config::PrepConfig, load::load, merge::MergedRow, pipeline::preprocess, segment::AgeGroup,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.get(1).map(String::as_str) == Some("gen") {
        run_generate(&args)
    } else {
        run_prepare(&args)
    }
}

fn run_prepare(args: &[String]) -> Result<()> {
    let data_dir = arg_value(args, "--data-dir").unwrap_or("./data");
    let out = arg_value(args, "--out");

    println!("prep-runner");
    println!("  data_dir: {data_dir}");
    if let Some(path) = out {
        println!("  out:      {path}");
    }
    println!();

    let config = PrepConfig::new(data_dir);
    let (portfolio, profile, transcript) = load(&config)?;
    let (offers, profiles, events) = (portfolio.len(), profile.len(), transcript.len());

    let merged = preprocess(portfolio, profile, transcript);

    print_summary(offers, profiles, events, &merged);

    if let Some(path) = out {
        gen::write_jsonl(Path::new(path), &merged)?;
        println!();
        println!("wrote {} merged rows to {path}", merged.len());
    }

    Ok(())
}

fn run_generate(args: &[String]) -> Result<()> {
    let data_dir = arg_value(args, "--data-dir").unwrap_or("./data");
    let spec = gen::GenSpec {
        seed:     parse_arg(args, "--seed", 42u64),
        offers:   parse_arg(args, "--offers", 10usize),
        profiles: parse_arg(args, "--profiles", 500usize),
        events:   parse_arg(args, "--events", 5000usize),
    };

    println!("prep-runner gen");
    println!("  data_dir: {data_dir}");
    println!("  seed:     {}", spec.seed);
    println!("  offers:   {}", spec.offers);
    println!("  profiles: {}", spec.profiles);
    println!("  events:   {}", spec.events);
    println!();

    gen::generate(Path::new(data_dir), &spec)?;
    println!("wrote portfolio.json, profile.json, transcript.json to {data_dir}");

    Ok(())
}

fn print_summary(offers: usize, profiles: usize, events: usize, merged: &[MergedRow]) {
    let dropped_events = events.saturating_sub(merged.len());
    let offer_rows = merged.iter().filter(|r| r.offer.is_some()).count();
    let volume: f64 = merged.iter().map(|r| r.transaction_amount).sum();

    let mut young = 0usize;
    let mut middle = 0usize;
    let mut senior = 0usize;
    let mut unsegmented = 0usize;
    for row in merged {
        match row.age_group {
            Some(AgeGroup::Young) => young += 1,
            Some(AgeGroup::MiddleAged) => middle += 1,
            Some(AgeGroup::Senior) => senior += 1,
            None => unsegmented += 1,
        }
    }

    println!("=== PREPARATION SUMMARY ===");
    println!("  offers:            {offers}");
    println!("  profiles:          {profiles}");
    println!("  transcript events: {events}");
    println!("  merged rows:       {}", merged.len());
    println!("  dropped events:    {dropped_events}");
    println!("  offer-linked rows: {offer_rows}");
    println!("  txn volume:        ${volume:.2}");
    println!();
    println!("=== AGE GROUPS ===");
    println!("  Young:       {young}");
    println!("  Middle-aged: {middle}");
    println!("  Senior:      {senior}");
    println!("  (no group):  {unsegmented}");
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
