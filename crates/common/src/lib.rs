//! Helpers shared by the workspace crates: logging setup, runtime directory
//! checks and small wire types.

pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_status() -> anyhow::Result<()> {
        let h = types::Health { status: "ok" };
        let json = serde_json::to_value(&h)?;
        assert_eq!(json, serde_json::json!({"status": "ok"}));
        Ok(())
    }
}
