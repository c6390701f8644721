use anyhow::Result;
use colored::Colorize;
use linq_builder::{presets, BlockKind, SizeVariant};

/// Print every block type with its default size
pub fn blocks() -> Result<()> {
    println!("{}", "📦 Block types".bright_blue().bold());
    println!();

    for kind in BlockKind::ALL {
        println!("  {}", format_kind(kind));
    }

    Ok(())
}

fn format_kind(kind: BlockKind) -> String {
    let title = match kind.default_title() {
        "" => String::new(),
        title => format!(" \"{}\"", title),
    };
    let allowed: Vec<&str> = kind
        .allowed_variants()
        .iter()
        .map(|variant| variant.as_str())
        .collect();

    format!(
        "{:<11} {}x{} {:<7}{} [{}]",
        kind.as_str().bright_white(),
        kind.default_width(),
        kind.default_height(),
        kind.default_variant().as_str(),
        title,
        allowed.join(", ")
    )
}

/// Print the theme catalog
pub fn themes() -> Result<()> {
    println!("{}", "🎨 Theme presets".bright_blue().bold());
    println!();

    for preset in presets() {
        let family = serde_json::to_value(preset.family)?;
        println!(
            "  {:<10} {} ({})",
            preset.id.bright_white(),
            preset.name,
            family.as_str().unwrap_or_default()
        );
        println!(
            "             {} bg {}  text {}  primary {}",
            "colors".dimmed(),
            preset.colors.background,
            preset.colors.text,
            preset.colors.primary
        );
        println!(
            "             {} {}  radius {}",
            "styles".dimmed(),
            preset.styles.font_family,
            preset.styles.border_radius
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kind() {
        colored::control::set_override(false);

        let line = format_kind(BlockKind::Gallery);
        assert!(line.starts_with("gallery"));
        assert!(line.contains("6x4 wide"));
        assert!(line.contains("\"Gallery\""));

        let line = format_kind(BlockKind::Link);
        assert!(!line.contains('"'));
        assert!(line.contains(SizeVariant::Classic.as_str()));
    }
}
