//! Info command
//!
//! Usage: rulescope info [--json]

use clap::Args;
use rulescope_client::ClientConfig;
use rulescope_core::CatalogInfo;

use super::{connect, emit, CommandResult};

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Print the catalog document as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute info command
pub async fn execute(args: InfoArgs, config: &ClientConfig) -> CommandResult {
    let session = connect(config).await?;
    let catalog = session.controller().catalog()?;

    let text = if args.json {
        serde_json::to_string_pretty(catalog)?
    } else {
        describe(catalog)
    };
    emit(&text, None)
}

/// One block per engine, in catalog order
pub fn describe(catalog: &CatalogInfo) -> String {
    let mut text = String::new();
    for (engine, descriptor) in catalog.iter() {
        text.push_str(engine);
        text.push('\n');
        let groups = if descriptor.groups.is_empty() {
            "(none)".to_string()
        } else {
            descriptor.groups.join(", ")
        };
        text.push_str(&format!("  groups: {}\n", groups));
        if descriptor.has_categories() {
            text.push_str("  categories:\n");
            for (category, values) in &descriptor.categories {
                text.push_str(&format!("    {}: {}\n", category, values.join(", ")));
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_lists_engines_in_order() {
        let catalog = CatalogInfo::from_value(json!({
            "E1": {"groups": ["G1", "G2"], "categories": {"Status": ["Active", "Pending"]}},
            "E2": {"groups": []}
        }))
        .unwrap();

        assert_eq!(
            describe(&catalog),
            "E1\n  groups: G1, G2\n  categories:\n    Status: Active, Pending\nE2\n  groups: (none)\n"
        );
    }
}
