//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::menu;
use super::output::{Output, OutputFormat};
use crate::domain::{Item, DATE_FORMAT};
use crate::storage::{default_list_path, ListFile};
use crate::store::TodoList;

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "An interactive to-do list manager for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the list file
    #[arg(long, global = true, env = "TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Operation to run; omit to enter the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items
    List {
        /// Show only undone items
        #[arg(long)]
        undone: bool,
    },

    /// Add an undone item
    Add {
        /// Task description
        text: String,
    },

    /// Mark an item done
    Done {
        /// Item index as shown by `list`
        index: usize,
    },

    /// Delete a done/undone item
    Delete {
        /// Item index as shown by `list`
        index: usize,
    },

    /// Search items by keyword
    Search {
        /// Keyword to match against item text
        keyword: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let path = cli.file.unwrap_or_else(default_list_path);
    output.verbose(&format!("Using list file: {}", path.display()));

    let mut list = TodoList::load(ListFile::new(path))?;
    output.verbose(&format!("Loaded {} items", list.len()));

    match cli.command {
        None => menu::run(&mut list),
        Some(Commands::List { undone }) => list_items(&output, &list, undone),
        Some(Commands::Add { text }) => add_item(&output, &mut list, &text),
        Some(Commands::Done { index }) => complete_item(&output, &mut list, index),
        Some(Commands::Delete { index }) => delete_item(&output, &mut list, index),
        Some(Commands::Search { keyword }) => search_items(&output, &mut list, &keyword),
    }
}

fn item_json(item: &Item) -> serde_json::Value {
    serde_json::json!({
        "text": item.text,
        "done": item.done,
        "added_on": item.added_on.format(DATE_FORMAT).to_string(),
        "done_on": item.done_on.map(|d| d.format(DATE_FORMAT).to_string()),
    })
}

fn list_items(output: &Output, list: &TodoList, undone_only: bool) -> Result<()> {
    if output.is_json() {
        let items: Vec<_> = list
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| !undone_only || !item.done)
            .map(|(index, item)| {
                let mut value = item_json(item);
                value["index"] = index.into();
                value
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    let mut shown = 0;
    for (index, item) in list.items().iter().enumerate() {
        if undone_only && item.done {
            continue;
        }
        println!("{:>3}  {}", index, item.display());
        shown += 1;
    }
    if shown == 0 {
        println!("No items");
    }
    Ok(())
}

fn add_item(output: &Output, list: &mut TodoList, text: &str) -> Result<()> {
    let index = list.add(text)?;
    list.flush()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "index": index,
            "text": text,
        }));
    } else {
        output.success(&format!("Added item {}: {}", index, text));
    }
    Ok(())
}

fn complete_item(output: &Output, list: &mut TodoList, index: usize) -> Result<()> {
    list.done(index)?;
    list.flush()?;

    if output.is_json() {
        output.data(&item_json(&list.items()[index]));
    } else {
        output.success(&format!("Marked item {} done", index));
    }
    Ok(())
}

fn delete_item(output: &Output, list: &mut TodoList, index: usize) -> Result<()> {
    list.del(index)?;
    list.flush()?;

    output.success(&format!("Deleted item {}", index));
    Ok(())
}

fn search_items(output: &Output, list: &mut TodoList, keyword: &str) -> Result<()> {
    let found = list.search(keyword);

    if output.is_json() {
        let items: Vec<_> = found.iter().map(|item| item_json(item)).collect();
        output.data(&items);
        return Ok(());
    }

    if found.is_empty() {
        println!("No match items");
    } else {
        for item in found {
            println!("{}", item.display());
        }
    }
    Ok(())
}
