use harzo_core::persona::{CAMERA_PRESETS, LIGHTING_PRESETS, PERSONA_PRESETS, STYLE_PRESETS};

pub fn print() {
    println!("Personas (harzo persona --preset <id>):");
    for preset in PERSONA_PRESETS {
        println!("  {:<12} {:<14} {}", preset.id, preset.name, preset.prompt);
    }

    println!("\nStyles:   {}", STYLE_PRESETS.join(", "));
    println!("Lighting: {}", LIGHTING_PRESETS.join(", "));
    println!("Camera:   {}", CAMERA_PRESETS.join(", "));
}
