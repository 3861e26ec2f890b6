// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sluice completions <shell>`: print a completion script on stdout
//!
//! ```bash
//! sluice completions zsh > ~/.zfunc/_sluice
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Write the script for `C`, named after its binary
    pub fn write<C: CommandFactory>(&self, out: &mut impl Write) {
        let mut cmd = C::command();
        let bin = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, bin, out);
    }
}
