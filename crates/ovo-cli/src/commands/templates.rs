//! `ovo templates` — list the built-in template kinds.

use anyhow::Result;

use ovo_core::templates::TemplateKind;

use crate::output;

pub async fn run() -> Result<()> {
    output::banner("Built-in templates");
    for kind in TemplateKind::ALL {
        output::template_row(kind);
    }
    println!();
    println!("  Usage: ovo new <name> --template <template>");
    println!();
    Ok(())
}
