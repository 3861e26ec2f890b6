// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sluice settings` - Print the effective settings

use crate::source::SettingsSource;
use anyhow::Result;
use clap::Args;

#[derive(Args)]
pub struct SettingsArgs {
    #[command(flatten)]
    pub source: SettingsSource,
}

pub fn handle(args: SettingsArgs) -> Result<()> {
    let settings = args.source.load()?;
    print!("{}", settings.to_toml()?);
    Ok(())
}
