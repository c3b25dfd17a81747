// Copyright (c) 2026 Mikko Tanner. All rights reserved.

use cidrex::{compile, compile_all, Options};
use std::{env, process::ExitCode};

fn main() -> ExitCode {
    let mut opts: Options = Options::default();
    let mut all: bool = false;
    let mut cidrs: Vec<String> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--all" => all = true,
            "--unanchored" => opts.anchored = false,
            "--ignore-case" => opts.ignore_case = true,
            "--leading-zeros" => opts.leading_zeros = true,
            _ => cidrs.push(arg),
        }
    }

    if cidrs.is_empty() {
        eprintln!("usage: cidrex [--all] [--unanchored] [--ignore-case] [--leading-zeros] <cidr>...");
        return ExitCode::from(2);
    }

    let mut status: ExitCode = ExitCode::SUCCESS;
    for cidr in &cidrs {
        let result = match all {
            true => compile_all(cidr, &opts),
            false => compile(cidr, &opts).map(|re| vec![re]),
        };
        match result {
            Ok(regexes) => regexes.iter().for_each(|re| println!("{}", re.as_str())),
            Err(e) => {
                eprintln!("{cidr}: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
