fn main() -> anyhow::Result<()> {
    zoink::cli::run()
}
