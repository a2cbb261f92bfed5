use std::io::{self, BufRead, Write};

use anyhow::Result;
use krnr::infrastructure::install::{
    contains_path, execute_install, get_status, plan_install, plan_uninstall, uninstall,
    InstallEnv, InstallOptions,
};

use super::Session;
use crate::ui::json::emit_data;
use crate::ui::output;
use crate::ui::views::{render_plan, render_status};

/// Read one answer after `prompt`; only `y`/`yes` count as yes.
fn confirm(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> io::Result<bool> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn path_prompt(system: bool) -> &'static str {
    if system {
        "Target dir is not on PATH. System PATH modification may require admin privileges. Add it to PATH now? [y/N]: "
    } else {
        "Target dir is not on PATH. Add it to PATH now? [y/N]: "
    }
}

pub fn cmd_install(session: &Session, mut opts: InstallOptions) -> Result<()> {
    let env = InstallEnv::detect()?;
    let (actions, target) = plan_install(&env, &opts)?;

    if session.ui.json {
        // Machine mode never asks; only an explicit --yes performs the install.
        let performed = if opts.yes && !opts.dry_run && !opts.check {
            Some(execute_install(&env, &opts)?)
        } else {
            None
        };
        emit_data(
            "install",
            serde_json::json!({ "target": target, "plan": actions, "performed": performed }),
        )?;
        return Ok(());
    }

    print!(
        "{}",
        render_plan(&format!("Planned actions for install to {}:", target.display()), &actions)
    );
    if opts.dry_run || opts.check {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let target_dir = target.parent().unwrap_or(&target);
    if !contains_path(&env.path_env, target_dir) && !opts.add_to_path && !opts.yes {
        opts.add_to_path = confirm(&mut input, &mut stdout, path_prompt(opts.system))?;
    }
    if !opts.yes && !confirm(&mut input, &mut stdout, "Proceed? [y/N]: ")? {
        println!("aborted");
        return Ok(());
    }

    for done in execute_install(&env, &opts)? {
        output::debug(&session.ui, done);
    }
    println!("install completed");
    Ok(())
}

pub fn cmd_uninstall(session: &Session, dry_run: bool, yes: bool) -> Result<()> {
    let env = InstallEnv::detect()?;
    let planned = plan_uninstall(&env);

    if session.ui.json {
        let performed = if yes && !dry_run {
            Some(uninstall(&env)?)
        } else {
            None
        };
        emit_data(
            "uninstall",
            serde_json::json!({ "plan": planned, "performed": performed }),
        )?;
        return Ok(());
    }

    print!("{}", render_plan("Planned actions for uninstall:", &planned));
    if dry_run {
        return Ok(());
    }

    if !yes {
        let stdin = io::stdin();
        if !confirm(&mut stdin.lock(), &mut io::stdout(), "Proceed with uninstall? [y/N]: ")? {
            println!("aborted by user (use --yes to skip confirmation)");
            return Ok(());
        }
    }

    output::debug(&session.ui, format!("PATH before: {}", env.path_env));
    for action in uninstall(&env)? {
        println!("- {}", action);
    }
    println!("uninstall completed");
    Ok(())
}

pub fn cmd_status(session: &Session) -> Result<()> {
    let env = InstallEnv::detect()?;
    let status = get_status(&env);

    if session.ui.json {
        emit_data("status", serde_json::json!({ "status": status }))?;
    } else {
        print!("{}", render_status(&status));
    }
    Ok(())
}
