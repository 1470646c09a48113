use anyhow::{bail, Context, Result};

use crate::config;
use crate::store::http::HttpStore;
use crate::store::{BoardStore, CardPatch};

/// Parse CLI args for `planner add` and append the card to the first list
/// of the remembered board.
pub async fn handle_add(args: &[String]) -> Result<()> {
    let (title, description) = match parse_add_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            print_add_usage();
            return Err(e);
        }
    };

    let config = config::load_config()?;
    let store = HttpStore::new(&config.api());

    let board_id = config::load_selected_board()
        .context("No board selected. Run `planner` once and pick a board.")?;

    let lists = store.fetch_lists(board_id).await?;
    let Some(list) = lists.first() else {
        bail!("The selected board has no lists. Open the planner and add one.");
    };

    let cards = store.fetch_cards().await?;
    let position = cards.iter().filter(|c| c.list_id == list.id).count() as i32;

    let card = store.create_card(list.id, &title, position).await?;
    if let Some(description) = description {
        store
            .update_card(
                card.id,
                &CardPatch {
                    description: Some(description),
                    ..Default::default()
                },
            )
            .await?;
    }

    println!("Added \"{}\" to {}", title, list.title);
    Ok(())
}

fn parse_add_args(args: &[String]) -> Result<(String, Option<String>)> {
    let mut title_parts: Vec<&str> = Vec::new();
    let mut description = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--desc" | "--description" => {
                let Some(value) = args.get(i + 1) else {
                    bail!("{} requires a value", args[i]);
                };
                description = Some(value.clone());
                i += 2;
            }
            other => {
                title_parts.push(other);
                i += 1;
            }
        }
    }

    if title_parts.is_empty() {
        bail!("Missing card title");
    }
    Ok((title_parts.join(" "), description))
}

fn print_add_usage() {
    println!("USAGE:");
    println!("  planner add <title> [-d <description>]");
    println!();
    println!("OPTIONS:");
    println!("  -d, --desc <text>  Set a description for the card");
    println!();
    println!("EXAMPLES:");
    println!("  planner add \"Renew fuel card\"");
    println!("  planner add \"Renew fuel card\" -d \"Expires at the end of the month\"");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_simple_title() {
        let (title, desc) = parse_add_args(&args(&["Renew fuel card"])).unwrap();
        assert_eq!(title, "Renew fuel card");
        assert_eq!(desc, None);
    }

    #[test]
    fn parse_multi_word_title() {
        let (title, desc) = parse_add_args(&args(&["Renew", "fuel", "card"])).unwrap();
        assert_eq!(title, "Renew fuel card");
        assert_eq!(desc, None);
    }

    #[test]
    fn parse_title_with_description() {
        let (title, desc) =
            parse_add_args(&args(&["Renew fuel card", "-d", "Expires soon"])).unwrap();
        assert_eq!(title, "Renew fuel card");
        assert_eq!(desc, Some("Expires soon".to_string()));
    }

    #[test]
    fn parse_long_description_flag() {
        let (title, desc) =
            parse_add_args(&args(&["Renew", "--description", "Expires soon"])).unwrap();
        assert_eq!(title, "Renew");
        assert_eq!(desc, Some("Expires soon".to_string()));
    }

    #[test]
    fn parse_empty_args_fails() {
        assert!(parse_add_args(&args(&[])).is_err());
    }

    #[test]
    fn parse_flag_without_value_fails() {
        assert!(parse_add_args(&args(&["Title", "-d"])).is_err());
    }
}
