use clap::Args;
use clap::crate_version;

#[derive(Args, Debug)]
pub struct VersionCommand;

pub async fn execute(action: &VersionCommand) -> i32 {
    match action {
        VersionCommand {} => print_version(),
    }
    0
}

pub fn print_version() {
    println!("LAUNCHPAD version: {}", crate_version!());
}
