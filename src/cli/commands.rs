use std::io::Read;
use std::path::Path;
use std::time::Duration;

use crate::app::{AppContext, LinkLabelError, Result};
use crate::domain::Resolution;
use crate::resolver::title_from_url;

pub async fn resolve_urls(
    ctx: &AppContext,
    urls: Vec<String>,
    json: bool,
    explain: bool,
    deadline_secs: Option<u64>,
) -> Result<()> {
    let deadline = deadline_secs.map(Duration::from_secs);
    let results = ctx.parallel_resolver(deadline).resolve_all(urls).await;

    for (url, resolution) in &results {
        println!("{}", format_resolution(url, resolution, json, explain)?);
    }

    Ok(())
}

fn format_resolution(url: &str, resolution: &Resolution, json: bool, explain: bool) -> Result<String> {
    if json {
        return serde_json::to_string(&resolution.result)
            .map_err(|e| LinkLabelError::Other(format!("Failed to encode result: {}", e)));
    }

    let mut line = format!("{}\t{}", url, resolution.result.display_title());
    if explain {
        line.push_str(&format!("\t[{}]", resolution.source));
    }
    Ok(line)
}

pub fn fallback(url: &str) -> Result<()> {
    match title_from_url(url) {
        Some(title) => println!("{}", title),
        None => println!("No title can be derived from {}", url),
    }
    Ok(())
}

pub fn extract_file(ctx: &AppContext, path: &Path) -> Result<()> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(path)?
    };
    let body = String::from_utf8_lossy(&bytes);

    let pipeline = ctx.resolver.pipeline();
    let candidates = pipeline.candidates(&body);

    if candidates.is_empty() {
        println!("No candidates found");
    }
    for candidate in &candidates {
        println!("{:>14}  {:?}", candidate.strategy, candidate.raw);
    }

    match pipeline.extract(&body) {
        Some(extracted) => println!("Title: {} (from {})", extracted.title, extracted.strategy),
        None => println!("Title: (none)"),
    }

    Ok(())
}

pub fn show_config(ctx: &AppContext) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# built-in defaults"),
    }

    let rendered = toml::to_string_pretty(&ctx.config)
        .map_err(|e| LinkLabelError::Other(format!("Failed to render config: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}
