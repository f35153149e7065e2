use std::process::ExitCode;

use bundle_launcher_lib::{EntryRegistry, LoadingContext};

fn hello(context: &LoadingContext, args: Vec<String>) -> Result<(), bundle_launcher_lib::ApplicationError> {
    let greeting = context
        .resource("greeting.txt")?
        .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
        .unwrap_or_else(|| "Hello".to_string());

    println!("{} {}", greeting, args.join(" "));
    Ok(())
}

fn main() -> ExitCode {
    let entries = EntryRegistry::new().with_entry("demo.Hello", hello);

    match bundle_launcher_lib::run(entries) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bundle-launcher: {}", e);
            ExitCode::FAILURE
        }
    }
}
