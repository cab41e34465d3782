use anyhow::{anyhow, Result};
use auditflow_core::{find_theme, spin_theme, Theme, FLOWER_THEMES};
use clap::Args;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

#[derive(Args, Debug)]
pub struct ThemesArgs {
    /// Pick one theme at random instead of listing them all
    #[arg(long)]
    pub spin: bool,
}

pub fn handle_themes_command(args: ThemesArgs) -> Result<()> {
    if args.spin {
        let theme = spin_theme(&mut rand::thread_rng());
        println!("{} {}", "🎰 You got:".magenta().bold(), theme.name.bold());
        println!(
            "   {} {} {}",
            swatch(theme.primary),
            swatch(theme.secondary),
            swatch(theme.accent)
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Name", "Primary", "Secondary", "Accent"]);
    for theme in FLOWER_THEMES.iter() {
        table.add_row(vec![theme.name, theme.primary, theme.secondary, theme.accent]);
    }

    println!("{}", "🌸 Flower themes".blue().bold());
    println!("{table}");
    Ok(())
}

/// Look up a catalog theme by name, ignoring case
pub fn resolve_theme(name: &str) -> Result<&'static Theme> {
    find_theme(name).ok_or_else(|| {
        anyhow!(
            "Unknown theme '{}'. Run 'auditflow themes' to list them",
            name
        )
    })
}

/// Color block followed by the hex code
fn swatch(color: &str) -> String {
    match Theme::rgb(color) {
        Some((r, g, b)) => format!("{} {}", "██".truecolor(r, g, b), color),
        None => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_theme() {
        let theme = resolve_theme(FLOWER_THEMES[3].name.to_uppercase().as_str()).unwrap();
        assert_eq!(theme, &FLOWER_THEMES[3]);

        let err = resolve_theme("Plastic Fern").unwrap_err();
        assert!(err.to_string().contains("Unknown theme 'Plastic Fern'"));
    }
}
