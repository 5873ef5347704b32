use crate::config::KeggConfig;
use anyhow::Result;
use kegg_core::{IdKind, LinkShape};
use std::path::Path;

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
    fix_hint: Option<String>,
}

impl CheckResult {
    fn ok(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Ok,
            detail: detail.into(),
            fix_hint: None,
        }
    }

    fn failed(
        name: impl Into<String>,
        status: CheckStatus,
        detail: impl Into<String>,
        fix_hint: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
            fix_hint,
        }
    }
}

pub async fn run(config: KeggConfig) -> Result<()> {
    println!();
    println!("KEGG Input Check");
    println!("{}", "─".repeat(50));

    let transform = config.transform_config();
    let mut results = Vec::new();

    for kind in IdKind::ALL {
        results.push(check_lookup(kind, transform.lookups.get(kind)));
    }
    for (shape, path) in transform.links.ordered() {
        results.push(check_link(shape, path));
    }
    results.push(check_output(&transform.output.nodes));

    let mut has_errors = false;
    for r in &results {
        let symbol = match r.status {
            CheckStatus::Ok => "[✓]",
            CheckStatus::Warning => "[⚠]",
            CheckStatus::Error => {
                has_errors = true;
                "[✗]"
            }
        };
        println!("{} {}: {}", symbol, r.name, r.detail);
        if let Some(hint) = &r.fix_hint {
            println!("    → {}", hint);
        }
    }

    println!("{}", "─".repeat(50));

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

/// First line of a TSV file, split on tabs.
fn read_header(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    Ok(rdr.headers()?.iter().map(str::to_string).collect())
}

fn check_lookup(kind: IdKind, path: &Path) -> CheckResult {
    let name = format!("{} lookup", kind);
    if !path.exists() {
        return CheckResult::failed(
            name,
            CheckStatus::Error,
            format!("{} not found", path.display()),
            Some("Download the KEGG list file or set its path in kegg.toml [input]".into()),
        );
    }
    match read_header(path) {
        Ok(header) => {
            let missing: Vec<&str> = [kind.id_column(), kind.name_column()]
                .into_iter()
                .filter(|c| !header.iter().any(|h| h.as_str() == *c))
                .collect();
            if missing.is_empty() {
                CheckResult::ok(name, path.display().to_string())
            } else {
                CheckResult::failed(
                    name,
                    CheckStatus::Error,
                    format!("{} lacks column(s) {}", path.display(), missing.join(", ")),
                    Some(format!(
                        "Header must include '{}' and '{}'",
                        kind.id_column(),
                        kind.name_column()
                    )),
                )
            }
        }
        Err(e) => CheckResult::failed(name, CheckStatus::Error, e.to_string(), None),
    }
}

fn check_link(expected: LinkShape, path: &Path) -> CheckResult {
    let name = format!("{} links", expected);
    if !path.exists() {
        return CheckResult::failed(
            name,
            CheckStatus::Error,
            format!("{} not found", path.display()),
            Some("Download the KEGG link file or set its path in kegg.toml [input]".into()),
        );
    }
    match read_header(path) {
        Ok(header) => match LinkShape::classify(&header) {
            Some(shape) if shape == expected => CheckResult::ok(name, path.display().to_string()),
            Some(shape) => CheckResult::failed(
                name,
                CheckStatus::Warning,
                format!("{} has {} columns", path.display(), shape),
                Some("Check the [input] entry points at the intended file".into()),
            ),
            None => CheckResult::failed(
                name,
                CheckStatus::Warning,
                format!("{} has unrecognised columns {:?}", path.display(), header),
                Some("Edges from this file will have no predicate or relation".into()),
            ),
        },
        Err(e) => CheckResult::failed(name, CheckStatus::Error, e.to_string(), None),
    }
}

fn check_output(nodes: &Path) -> CheckResult {
    let name = "Output directory";
    match nodes.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) if !dir.exists() => CheckResult::failed(
            name,
            CheckStatus::Warning,
            format!("{} does not exist yet", dir.display()),
            Some("It will be created by `kegg transform`".into()),
        ),
        Some(dir) => CheckResult::ok(name, dir.display().to_string()),
        None => CheckResult::ok(name, "."),
    }
}
