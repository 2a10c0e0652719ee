use crate::cmd::CatalogArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_catalog, OutputFormat};

pub fn run(args: CatalogArgs, format: OutputFormat) -> CliResult<i32> {
    let catalog = args.source.load()?;
    print_catalog(&catalog, format);
    Ok(SUCCESS)
}
