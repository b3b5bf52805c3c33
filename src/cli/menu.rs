//! Interactive menu shell
//!
//! Presents the five operations in a loop until the user quits. Esc
//! inside an operation aborts it and returns to the menu; Esc (or Quit)
//! at the menu exits cleanly.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::store::TodoList;

const BANNER: &str = r#" _____         _       _ _     _
|_   _|__   __| | ___ | (_)___| |_
  | |/ _ \ / _` |/ _ \| | / __| __|
  | | (_) | (_| | (_) | | \__ \ |_
  |_|\___/ \__,_|\___/|_|_|___/\__|
"#;

const OPERATIONS: &[&str] = &[
    "List   [list all items]",
    "Add    [add an undone item]",
    "Delete [delete a done/undone item]",
    "Done   [mark an item done]",
    "Search [search items by keyword]",
    "Quit",
];

/// Runs the menu loop over the given list
pub fn run(list: &mut TodoList) -> Result<()> {
    println!("{}", BANNER);

    let theme = ColorfulTheme::default();
    let mut position = 0;

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("Select an operation")
            .items(OPERATIONS)
            .default(position)
            .interact_opt()?;

        let Some(choice) = choice else {
            return Ok(());
        };
        position = choice;

        match choice {
            0 => list_operation(list),
            1 => add_operation(list, &theme)?,
            2 => delete_operation(list, &theme)?,
            3 => done_operation(list, &theme)?,
            4 => search_operation(list, &theme)?,
            _ => return Ok(()),
        }
    }
}

fn list_operation(list: &TodoList) {
    if list.is_empty() {
        empty_prompt();
        return;
    }
    for line in list.display_all() {
        println!("{}", line);
    }
}

fn add_operation(list: &mut TodoList, theme: &ColorfulTheme) -> Result<()> {
    let text: String = Input::with_theme(theme)
        .with_prompt("Input an item")
        .allow_empty(true)
        .interact_text()?;

    match list.add(&text) {
        Ok(_) => {
            list.flush()?;
            success_prompt();
        }
        Err(_) => failed_prompt(),
    }
    Ok(())
}

fn delete_operation(list: &mut TodoList, theme: &ColorfulTheme) -> Result<()> {
    if list.is_empty() {
        empty_prompt();
        return Ok(());
    }

    let renderings = list.display_all();
    let pick = Select::with_theme(theme)
        .with_prompt("Select one item")
        .items(&renderings)
        .interact_opt()?;

    let Some(pick) = pick else {
        return Ok(());
    };

    match list.del(pick) {
        Ok(()) => {
            list.flush()?;
            success_prompt();
        }
        Err(_) => failed_prompt(),
    }
    Ok(())
}

fn done_operation(list: &mut TodoList, theme: &ColorfulTheme) -> Result<()> {
    if list.is_empty() {
        empty_prompt();
        return Ok(());
    }

    let renderings = list.display_undone();
    if renderings.is_empty() {
        no_match_prompt();
        return Ok(());
    }

    // Parallel to renderings: maps the picked row back to a real index
    let indices = list.undone_indices();

    let pick = Select::with_theme(theme)
        .with_prompt("Select one undone item")
        .items(&renderings)
        .interact_opt()?;

    let Some(pick) = pick else {
        return Ok(());
    };

    match list.done(indices[pick]) {
        Ok(()) => {
            list.flush()?;
            success_prompt();
        }
        Err(_) => failed_prompt(),
    }
    Ok(())
}

fn search_operation(list: &mut TodoList, theme: &ColorfulTheme) -> Result<()> {
    let keyword: String = Input::with_theme(theme)
        .with_prompt("Input keyword")
        .allow_empty(true)
        .interact_text()?;

    let found = list.search(&keyword);
    if found.is_empty() {
        no_match_prompt();
        return Ok(());
    }

    for item in found {
        println!("{}", item.display());
    }
    Ok(())
}

fn success_prompt() {
    println!("{}", "success".green().bold());
}

fn failed_prompt() {
    println!("{}", "failed".red().bold());
}

fn empty_prompt() {
    println!("{}", "No items".red());
}

fn no_match_prompt() {
    println!("{}", "No match items".red());
}
