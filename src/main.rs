fn main() {
    #[cfg(feature = "cli")]
    oxilzss::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("oxilzss: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
