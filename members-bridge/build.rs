// Generate the member tables into OUT_DIR.
//
// MEMBERS_MAX_ARITY overrides the covered arity (default 64). The small
// combined fixtures are used by the integration tests to exercise the
// boundaries of a narrow table.

use members_gen::{GeneratorConfig, Layout};
use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MEMBERS_MAX_ARITY");

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    let max_arity = match env::var("MEMBERS_MAX_ARITY") {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .unwrap_or_else(|_| panic!("MEMBERS_MAX_ARITY is not an integer: {value}")),
        Err(_) => members_gen::config::DEFAULT_MAX_ARITY as i64,
    };

    // Past the default, the over-maximum doc example no longer applies.
    println!("cargo:rustc-check-cfg=cfg(members_wide_table)");
    if max_arity > members_gen::config::DEFAULT_MAX_ARITY as i64 {
        println!("cargo:rustc-cfg=members_wide_table");
    }

    let config = GeneratorConfig::new(max_arity)
        .unwrap_or_else(|e| panic!("{e}"))
        .with_layout(Layout::Separate {
            visit: out_dir.join("members_visitor.rs"),
            tie: out_dir.join("members_tie.rs"),
        });
    members_gen::run(&config).unwrap_or_else(|e| panic!("{e}"));

    for n in [1, 3] {
        let fixture = GeneratorConfig::new(n)
            .unwrap_or_else(|e| panic!("{e}"))
            .with_layout(Layout::Combined(out_dir.join(format!("members_n{n}.rs"))));
        members_gen::run(&fixture).unwrap_or_else(|e| panic!("{e}"));
    }
}
