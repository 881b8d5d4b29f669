use anyhow::{Context, Result};
use beamlit::api::resource;
use beamlit::codec::{Number, Record, Value};
use beamlit::models::{Resource, ResourceMetrics};
use colored::Colorize;

use super::{for_kind, GlobalArgs, ResourceKind, Session};
use crate::output::{print_table_header, print_table_row};

/// Show request metrics of a resource
pub async fn run(globals: &GlobalArgs, kind: ResourceKind, name: &str) -> Result<()> {
    let session = Session::connect(globals)?;
    let metrics = for_kind!(kind, fetch(&session, name))?;

    if !session.output.is_table() {
        return session.output.print_value(&Value::Object(metrics.encode()));
    }

    println!("{} {}", "Metrics".bold(), name.cyan());
    println!("{}", "─".repeat(40));
    let number = |v: Option<&Number>| {
        v.and_then(Number::as_f64)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".into())
    };
    println!("  Requests total:  {}", number(metrics.request_total.value()));
    println!("  Requests/sec:    {}", number(metrics.rps.value()));

    if let Some(per_code) = metrics.request_total_per_code.value().filter(|m| !m.is_empty()) {
        println!();
        print_table_header(&[("CODE", 6), ("TOTAL", 12), ("RPS", 10)]);
        let rps = metrics.rps_per_code.value();
        for (code, total) in per_code {
            let total = total.to_string();
            let code_rps = number(rps.and_then(|m| m.get(code)));
            print_table_row(&[
                (code.as_str(), 6),
                (total.as_str(), 12),
                (code_rps.as_str(), 10),
            ]);
        }
    }
    Ok(())
}

async fn fetch<R: Resource>(session: &Session, name: &str) -> Result<ResourceMetrics> {
    resource::metrics::<R>(&session.client, name, session.env())
        .await
        .with_context(|| format!("Failed to get metrics of {} {}", R::SINGULAR, name))?
        .parsed
        .with_context(|| format!("No metrics for {} {}", R::SINGULAR, name))
}
