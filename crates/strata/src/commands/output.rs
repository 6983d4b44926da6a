//! Shared result rendering for resolve commands

use anyhow::Result;
use serde::Serialize;
use strata_core::{Resolution, Resolver, Strategy};

use super::Context;

/// JSON form of a resolved setting
#[derive(Debug, Serialize)]
struct ResolvedOutput<'a> {
    setting: &'a str,
    #[serde(flatten)]
    resolution: &'a Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    strategies: Option<Vec<String>>,
}

/// Print a successful resolution of `setting`.
pub(crate) fn print_resolution(
    ctx: &Context,
    resolver: &Resolver<'_>,
    setting: &str,
    resolution: &Resolution,
) -> Result<()> {
    let strategies: Vec<String> = resolver
        .strategies_for(setting)
        .iter()
        .map(|s| s.describe())
        .collect();

    if ctx.json {
        let output = ResolvedOutput {
            setting,
            resolution,
            strategies: ctx.explain.then_some(strategies),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if ctx.explain {
        println!("{setting}:");
        for line in explain_lines(&strategies, Some(resolution.position)) {
            println!("{line}");
        }
        println!();
    }
    println!("{}", resolution.value);
    Ok(())
}

/// Print the ordered source list for `setting` when resolution failed.
pub(crate) fn print_unresolved(ctx: &Context, resolver: &Resolver<'_>, setting: &str) {
    if !ctx.explain || ctx.json {
        return;
    }
    let strategies: Vec<String> = resolver
        .strategies_for(setting)
        .iter()
        .map(|s| s.describe())
        .collect();
    eprintln!("{setting}:");
    for line in explain_lines(&strategies, None) {
        eprintln!("{line}");
    }
}

/// Numbered source list, marking the answering position with `*`.
fn explain_lines(strategies: &[String], answered: Option<usize>) -> Vec<String> {
    strategies
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let marker = if answered == Some(i) { '*' } else { ' ' };
            format!("{marker} {}. {source}", i + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_lines_marks_answer() {
        let strategies = vec!["flag --editor".to_string(), "env $EDITOR".to_string()];
        let lines = explain_lines(&strategies, Some(1));
        assert_eq!(lines, vec!["  1. flag --editor", "* 2. env $EDITOR"]);
    }

    #[test]
    fn test_explain_lines_without_answer() {
        let strategies = vec!["env $EDITOR".to_string()];
        assert_eq!(explain_lines(&strategies, None), vec!["  1. env $EDITOR"]);
    }
}
