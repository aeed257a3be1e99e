use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let status = ctx.classifier.health().await?;
    let text = format!("{}: {}", ctx.classifier.base_url(), status.status);
    ctx.output.emit(&text, &status)
}
