// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
   ___  ___ __ _  (_)__  (_)  ___  _______  / /  ___
  / _ `/ -_)  ' \/ / _ \/ /  / _ \/ __/ _ \/ _ \/ -_)
  \_, /\__/_/_/_/_/_//_/_/  / .__/_/  \___/_.__/\__/
 /___/                     /_/

    Gemini API Configuration Probe
"#;
    println!("{}", banner);
}
