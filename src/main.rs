// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Partscope-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Partscope and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Partscope CLI entrypoint.
//!
//! Opens the interactive parts viewer on a catalog folder (or the bundled demo catalog).
//! `--check` validates a catalog folder and prints a summary instead.

use std::error::Error;

use partscope::model::Catalog;
use partscope::store::{self, CatalogAssets, CatalogFolder};
use tracing::info;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<catalog-dir>] [--product <slug>] [--group <slug>] [--log-file <path>]\n  {program} [--catalog <dir>] [--product <slug>] [--group <slug>] [--log-file <path>]\n  {program} --demo [--product <slug>] [--group <slug>] [--log-file <path>]\n  {program} --check [<catalog-dir>]\n\nIf catalog-dir/--catalog is omitted, the current working directory is used.\n--demo uses the bundled demo catalog and cannot be combined with catalog-dir/--catalog.\n--product/--group open the viewer on that page (default: the first of each).\n--check loads and validates the catalog, prints a summary, and exits.\n\nLogging is off unless --log-file or PARTSCOPE_LOG_FILE is set; PARTSCOPE_LOG sets the filter."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    check: bool,
    catalog_dir: Option<String>,
    product: Option<String>,
    group: Option<String>,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--check" => {
                if options.check {
                    return Err(());
                }
                options.check = true;
            }
            "--catalog" => {
                if options.catalog_dir.is_some() {
                    return Err(());
                }
                options.catalog_dir = Some(args.next().ok_or(())?);
            }
            "--product" => {
                if options.product.is_some() {
                    return Err(());
                }
                options.product = Some(args.next().ok_or(())?);
            }
            "--group" => {
                if options.group.is_some() {
                    return Err(());
                }
                options.group = Some(args.next().ok_or(())?);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.catalog_dir.is_some() {
                    return Err(());
                }
                options.catalog_dir = Some(arg);
            }
        }
    }

    if options.demo && options.catalog_dir.is_some() {
        return Err(());
    }

    if options.check && (options.product.is_some() || options.group.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn catalog_summary(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    for product in catalog.products() {
        lines.push(format!(
            "{} ({}): {} parts groups",
            product.product_id(),
            product.name(),
            product.groups().len()
        ));
        for group in product.groups() {
            let parts = group
                .diagrams()
                .iter()
                .map(|diagram| diagram.parts().len())
                .sum::<usize>();
            lines.push(format!(
                "  {} {} ({}): {} diagrams, {} parts",
                group.icon().glyph(),
                group.group_id(),
                group.title(),
                group.diagrams().len(),
                parts
            ));
        }
    }
    lines
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "partscope".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if !options.check {
            partscope::logging::init(options.log_file.as_deref())?;
        }

        let (catalog, assets) = if options.demo {
            (store::demo_catalog()?, CatalogAssets::Bundled)
        } else {
            let folder =
                CatalogFolder::new(options.catalog_dir.unwrap_or_else(|| ".".to_owned()));
            (folder.load_catalog()?, CatalogAssets::Folder(folder))
        };

        if options.check {
            println!("{}: ok", assets.origin());
            for line in catalog_summary(&catalog) {
                println!("{line}");
            }
            return Ok(());
        }

        let page = catalog.page(options.product.as_deref(), options.group.as_deref())?;
        info!(
            product = page.product_index,
            group = page.group_index,
            "opening catalog page"
        );
        partscope::tui::run_with_catalog(catalog, assets, page)
    })();

    if let Err(err) = result {
        eprintln!("partscope: {err}");
        std::process::exit(1);
    }
}
