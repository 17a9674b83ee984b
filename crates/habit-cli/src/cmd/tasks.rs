//! `hb tasks` — list the catalog blocks and task ids.

use crate::output::{OutputMode, pretty_rule, render_mode};
use anyhow::Result;
use clap::Args;
use habit_core::{Catalog, Store, config};
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct TasksArgs {}

/// Execute `hb tasks`.
pub fn run_tasks(_args: &TasksArgs, output: OutputMode, store: &Store) -> Result<()> {
    let (catalog, _levels) = config::load(store.data_dir())?;
    render_mode(output, &catalog, render_tasks_text, render_tasks_pretty)
}

fn render_tasks_text(catalog: &Catalog, w: &mut dyn Write) -> std::io::Result<()> {
    for block in catalog.blocks() {
        for task in &block.tasks {
            writeln!(w, "{}  {}  {}", block.id, task.id, task.label)?;
        }
    }
    Ok(())
}

fn render_tasks_pretty(catalog: &Catalog, w: &mut dyn Write) -> std::io::Result<()> {
    for (i, block) in catalog.blocks().iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}", block.title.to_uppercase())?;
        pretty_rule(w)?;
        for task in &block.tasks {
            match &task.note {
                Some(note) => writeln!(w, "  {:<16} {:<32} {note}", task.id, task.label)?,
                None => writeln!(w, "  {:<16} {}", task.id, task.label)?,
            }
        }
    }
    writeln!(w)?;
    writeln!(w, "{} tasks total", catalog.total_tasks())
}
