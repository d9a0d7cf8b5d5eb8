fn main() -> anyhow::Result<()> {
    nestbench::run()
}
