use anyhow::Context;

fn main() -> anyhow::Result<()> {
    prompt_manager::run().context("Prompt Manager could not start")
}
