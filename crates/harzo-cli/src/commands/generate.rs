use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use harzo_application::Event;
use harzo_core::persona::find_persona_preset;
use harzo_core::{HistoryEntry, ImageGenerator, Mode};

use super::context::AppContext;
use super::settings::SettingsArgs;

pub async fn create(
    context: &AppContext,
    prompt: String,
    enhance: bool,
    settings: &SettingsArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let usecase = context
        .usecase(settings.apply(context.config.generation.clone())?)
        .await?;

    usecase.dispatch(Event::EditPrompt(prompt)).await;
    if enhance {
        let state = usecase.dispatch(Event::EnhancePrompt).await;
        println!("Enhanced prompt: {}", state.prompt);
    }

    let entry = usecase.generate(Mode::Create, None, None).await?;
    finish(context, &entry, output).await
}

pub async fn transform(
    context: &AppContext,
    image: &Path,
    instruction: String,
    settings: &SettingsArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let source = context.codec.encode_file(image).await?;
    let usecase = context
        .usecase(settings.apply(context.config.generation.clone())?)
        .await?;

    let entry = usecase
        .generate(Mode::Transform, Some(instruction), Some(source))
        .await?;
    finish(context, &entry, output).await
}

pub async fn persona(
    context: &AppContext,
    image: &Path,
    preset: Option<String>,
    instruction: Option<String>,
    settings: &SettingsArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let source = context.codec.encode_file(image).await?;
    let usecase = context
        .usecase(settings.apply(context.config.generation.clone())?)
        .await?;

    usecase.dispatch(Event::SwitchMode(Mode::Persona)).await;
    match (preset, instruction) {
        (Some(id), _) => {
            if find_persona_preset(&id).is_none() {
                bail!("unknown persona preset '{id}' (see `harzo presets`)");
            }
            usecase.dispatch(Event::SelectPersona(id)).await;
        }
        (None, Some(instruction)) => {
            usecase.dispatch(Event::EditPrompt(instruction)).await;
        }
        (None, None) => bail!("pass --preset <id> or --instruction <text>"),
    }

    let entry = usecase.generate(Mode::Persona, None, Some(source)).await?;
    finish(context, &entry, output).await
}

pub async fn expand(
    context: &AppContext,
    image: &Path,
    settings: &SettingsArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let source = context.codec.encode_file(image).await?;
    let usecase = context
        .usecase(settings.apply(context.config.generation.clone())?)
        .await?;

    let entry = usecase.generate(Mode::Expand, None, Some(source)).await?;
    finish(context, &entry, output).await
}

pub async fn enhance(context: &AppContext, prompt: String) -> Result<()> {
    let generator = context.generator().await?;
    let enhanced = generator
        .enhance_prompt(&prompt)
        .await
        .context("Prompt enhancement failed")?;
    println!("{enhanced}");
    Ok(())
}

async fn finish(context: &AppContext, entry: &HistoryEntry, output: Option<PathBuf>) -> Result<()> {
    println!("Saved to history as {} ({})", entry.id, entry.mode);

    match output {
        Some(dir) => {
            let path = dir.join(entry.file_name());
            context.codec.save_to_file(&entry.image, &path).await?;
            println!("Wrote {}", path.display());
        }
        None => println!("Run `harzo history save {}` to write the image", entry.id),
    }
    Ok(())
}
