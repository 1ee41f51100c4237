// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use runtime::ApiRuntime;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use stockpile_app::{InventoryBackend, InventoryView, Item, ItemField, ItemId};
use tracing::info;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("{error:#}");
            std::process::exit(1);
        }
    }
}

/// `Ok(false)` means a one-shot command ran but ended in a failure status.
fn run() -> Result<bool> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(true);
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(true);
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(true);
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `stockpile --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_tracing(&config)?;

    let client = stockpile_api::Client::new(&config.api_base_url(), config.api_timeout()?)
        .with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
    info!(endpoint = client.endpoint(), "inventory client ready");
    if options.check_only {
        return Ok(true);
    }

    let mut runtime = ApiRuntime::new(client);
    let mut view = InventoryView::new();
    match options.command {
        None => {
            stockpile_tui::run_app(&mut view, runtime)?;
            Ok(true)
        }
        Some(command) => {
            let mut stdout = io::stdout().lock();
            run_command(&mut view, &mut runtime, &command, &mut stdout)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Get(ItemId),
    Delete(ItemId),
    Add([String; 5]),
    Update([String; 5]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    command: Option<Command>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        command: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            flag if flag.starts_with('-') => {
                bail!("unknown argument {flag:?}; run with --help to see supported options");
            }
            name => {
                let rest: Vec<String> = iter
                    .by_ref()
                    .map(|arg| arg.as_ref().to_owned())
                    .collect();
                options.command = Some(parse_command(name, &rest)?);
            }
        }
    }

    Ok(options)
}

fn parse_command(name: &str, args: &[String]) -> Result<Command> {
    match name {
        "list" => {
            expect_arity(name, args, 0, "list")?;
            Ok(Command::List)
        }
        "get" | "delete" => {
            expect_arity(name, args, 1, &format!("{name} <id>"))?;
            let id = ItemId::parse(&args[0])
                .ok_or_else(|| anyhow!("{name}: {:?} is not an integer id", args[0]))?;
            Ok(if name == "get" {
                Command::Get(id)
            } else {
                Command::Delete(id)
            })
        }
        "add" | "update" => {
            expect_arity(
                name,
                args,
                ItemField::ALL.len(),
                &format!("{name} <id> <name> <category> <stock> <price>"),
            )?;
            let fields: [String; 5] = std::array::from_fn(|index| args[index].clone());
            Ok(if name == "add" {
                Command::Add(fields)
            } else {
                Command::Update(fields)
            })
        }
        unknown => {
            bail!("unknown command {unknown:?}; expected one of list, get, add, update, delete")
        }
    }
}

fn expect_arity(name: &str, args: &[String], expected: usize, usage: &str) -> Result<()> {
    if args.len() != expected {
        bail!(
            "{name} takes {expected} argument(s), got {}; usage: stockpile {usage}",
            args.len()
        );
    }
    Ok(())
}

/// Drives the same view-model the terminal UI uses and prints the outcome.
/// Returns whether the command succeeded.
fn run_command<B, W>(
    view: &mut InventoryView,
    backend: &mut B,
    command: &Command,
    out: &mut W,
) -> Result<bool>
where
    B: InventoryBackend + ?Sized,
    W: Write,
{
    let succeeded = match command {
        Command::List => {
            view.mount(backend);
            print_status(view, out)?;
            if status_is_error(view) {
                return Ok(false);
            }
            write!(out, "{}", format_items_table(view.items())).context("write item table")?;
            true
        }
        Command::Get(id) => {
            view.fetch_by_id(backend, *id);
            print_status(view, out)?;
            if let Some(item) = view.lookup() {
                let json = serde_json::to_string_pretty(item).context("encode item")?;
                writeln!(out, "{json}").context("write item")?;
            }
            view.lookup().is_some()
        }
        Command::Delete(id) => {
            view.delete(backend, *id);
            print_status(view, out)?;
            !status_is_error(view)
        }
        Command::Add(fields) => {
            fill_form(view, fields);
            view.submit(backend);
            print_status(view, out)?;
            view.form().is_empty() && !status_is_error(view)
        }
        Command::Update(fields) => {
            let Some(id) = ItemId::parse(&fields[0]) else {
                fill_form(view, fields);
                if let Err(error) = view.validate() {
                    info!(
                        field = error.field().as_str(),
                        "update rejected before lookup"
                    );
                }
                print_status(view, out)?;
                return Ok(false);
            };
            view.fetch_by_id(backend, id);
            match view.lookup().cloned() {
                Some(existing) => {
                    view.begin_edit(&existing);
                    fill_form(view, fields);
                    view.submit(backend);
                    print_status(view, out)?;
                    !view.edit_mode() && !status_is_error(view)
                }
                None => {
                    print_status(view, out)?;
                    false
                }
            }
        }
    };
    Ok(succeeded)
}

fn fill_form(view: &mut InventoryView, fields: &[String; 5]) {
    for (field, value) in ItemField::ALL.into_iter().zip(fields) {
        view.on_field_change(field, value.clone());
    }
}

fn status_is_error(view: &InventoryView) -> bool {
    view.status().is_some_and(|status| status.is_error())
}

fn print_status<W: Write>(view: &InventoryView, out: &mut W) -> Result<()> {
    if let Some(status) = view.status() {
        writeln!(out, "{}", status.as_str()).context("write status")?;
    }
    Ok(())
}

fn format_items_table(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items found.\n".to_owned();
    }

    let header: Vec<String> = ItemField::ALL
        .iter()
        .map(|field| field.as_str().to_owned())
        .collect();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            ItemField::ALL
                .iter()
                .map(|field| field.display_value(item))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|column| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .chain(std::iter::once(header[column].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

fn print_help() {
    println!("stockpile - inventory manager");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and client setup");
    println!("  --help                   Show this help");
    println!();
    println!("commands (omit to launch the terminal UI):");
    println!("  list                                       Print all items");
    println!("  get <id>                                   Print one item");
    println!("  add <id> <name> <category> <stock> <price> Create an item");
    println!("  update <id> <name> <category> <stock> <price> Replace an existing item");
    println!("  delete <id>                                Delete an item");
}
