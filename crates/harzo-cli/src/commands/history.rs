use std::path::Path;

use anyhow::Result;
use harzo_core::{HarzoError, HistoryEntry, HistoryRepository};

use super::context::AppContext;

pub async fn list(context: &AppContext) -> Result<()> {
    let entries = context.history.list().await;
    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{:<15} {:<10} {:<9} {:<7} {}",
            entry.id,
            entry.mode.as_str(),
            entry.settings.quality.label(),
            entry.settings.aspect_ratio.label(),
            truncate(&entry.prompt, 60)
        );
    }
    Ok(())
}

pub async fn show(context: &AppContext, id: &str) -> Result<()> {
    let entry = find(context, id).await?;
    let mut value = serde_json::to_value(&entry)?;
    // The image payload can be megabytes; show only its header.
    if let Some(object) = value.as_object_mut() {
        let mime = entry.image.mime_type().unwrap_or("unknown");
        object.insert(
            "url".to_string(),
            serde_json::Value::String(format!("data:{mime};base64,...")),
        );
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

pub async fn delete(context: &AppContext, id: &str) -> Result<()> {
    find(context, id).await?;
    context.history.remove(id).await?;
    println!("Deleted {id}");
    Ok(())
}

pub async fn clear(context: &AppContext) -> Result<()> {
    context.history.clear().await?;
    println!("History cleared");
    Ok(())
}

pub async fn save(context: &AppContext, id: &str, output: &Path) -> Result<()> {
    let entry = find(context, id).await?;
    let path = output.join(entry.file_name());
    context.codec.save_to_file(&entry.image, &path).await?;
    println!("Wrote {}", path.display());
    Ok(())
}

async fn find(context: &AppContext, id: &str) -> Result<HistoryEntry> {
    context
        .history
        .get(id)
        .await
        .ok_or_else(|| HarzoError::not_found("history entry", id).into())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars - 1).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let context =
            AppContext::load(harzo_infrastructure::HarzoPaths::new(Some(dir.path()))).unwrap();

        let err = find(&context, "missing").await.unwrap_err();
        let err = err.downcast_ref::<HarzoError>().unwrap();
        assert!(err.is_not_found());
        assert!(delete(&context, "missing").await.is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ドラゴンの騎士", 4), "ドラゴ…");
    }
}
