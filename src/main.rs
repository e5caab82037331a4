fn main() {
    #[cfg(feature = "cli")]
    runedata::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("runedata: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
