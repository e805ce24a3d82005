//! Fruit-basket command tree run by the binary

use std::sync::{Arc, Mutex, PoisonError};

use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Style};
use treeprompt::command::{Arity, CommandNode, Flag};
use treeprompt::error::{Result, ShellError};
use treeprompt::repl::PrefixProvider;
use treeprompt::repl::completion::{
    CompletionHint, DefaultFlagValueCompleter, FlagValueCompleter, Suggestion,
};

/// Items added so far, in insertion order
pub type Items = Arc<Mutex<Vec<String>>>;

/// Build the basket tree.
///
/// `prompt` changes the text served by `prefix`.
pub fn command_tree(items: Items, prefix: PrefixProvider) -> CommandNode {
    CommandNode::new("basket")
        .short("Fill a fruit basket")
        .subcommand(
            CommandNode::new("quit")
                .short("Quit program")
                .alias("exit")
                .arity(Arity::None)
                .action(|inv| {
                    inv.request_exit();
                    Ok(())
                }),
        )
        .subcommand(show_command(items.clone()))
        .subcommand(add_command(items))
        .subcommand(
            CommandNode::new("prompt")
                .short("Change the prompt")
                .arity(Arity::Exact(1))
                .action(move |inv| {
                    prefix.set_prompt_prefix(inv.args()[0].clone());
                    Ok(())
                }),
        )
}

fn show_command(items: Items) -> CommandNode {
    CommandNode::new("show")
        .short("Show items")
        .arity(Arity::None)
        .action(move |_| {
            let items = items.lock().unwrap_or_else(PoisonError::into_inner);
            println!("{}", render_items(&items));
            Ok(())
        })
}

fn add_command(items: Items) -> CommandNode {
    let apples = items.clone();
    let melons = items;

    CommandNode::new("add")
        .short("Add an item")
        .persistent_flag(
            Flag::int("count", 1)
                .shorthand('n')
                .usage("Number of items to add"),
        )
        .subcommand(
            CommandNode::new("apple")
                .short("Add apple")
                .flag(Flag::string("color", "red").shorthand('c').usage("Apple color"))
                .arity(Arity::None)
                .action(move |inv| {
                    let count = positive_count(inv.get_int("count")?)?;
                    let color = inv.get_string("color")?;
                    let mut items = apples.lock().unwrap_or_else(PoisonError::into_inner);
                    items.extend((0..count).map(|_| format!("{color} apple")));
                    Ok(())
                }),
        )
        .subcommand(
            CommandNode::new("melon")
                .short("Add melon")
                .flag(
                    Flag::int("size", 3)
                        .shorthand('s')
                        .usage("Melon size in kilograms"),
                )
                .arity(Arity::None)
                .action(move |inv| {
                    let count = positive_count(inv.get_int("count")?)?;
                    let size = inv.get_int("size")?;
                    let mut items = melons.lock().unwrap_or_else(PoisonError::into_inner);
                    items.extend((0..count).map(|_| format!("{size}kg melon")));
                    Ok(())
                }),
        )
}

fn positive_count(count: i64) -> Result<usize> {
    usize::try_from(count)
        .map_err(|_| ShellError::failed(format!("count must not be negative, got {count}")))
}

/// Items as a numbered table
pub fn render_items(items: &[String]) -> String {
    if items.is_empty() {
        return "(basket is empty)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(vec!["#".to_string(), "item".to_string()]);
    for (i, item) in items.iter().enumerate() {
        builder.push_record(vec![(i + 1).to_string(), item.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

/// Offers ripeness choices for `--color`, defaults elsewhere
pub struct BasketCompleter;

impl FlagValueCompleter for BasketCompleter {
    fn complete_value(&self, hint: &CompletionHint<'_>) -> Vec<Suggestion> {
        match hint.flag {
            Some(flag) if flag.name() == "color" => vec![
                Suggestion::new("green", "young apple"),
                Suggestion::new("red", "ripen apple"),
            ],
            _ => DefaultFlagValueCompleter.complete_value(hint),
        }
    }
}
