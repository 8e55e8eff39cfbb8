use tagbench::ui::drivers::InquireDriver;
use tagbench::ui::wizard;

fn main() -> anyhow::Result<()> {
    wizard::run(&InquireDriver)
}
