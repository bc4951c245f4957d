use anyhow::Result;

use crate::app::AppState;

pub fn show(state: &AppState) -> Result<()> {
    let paths = &state.paths;
    let files = state.engine.files();

    println!("Config file:  {}", paths.config_file().display());
    println!("Cache dir:    {}", paths.cache_dir().display());
    println!("Work dir:     {}", paths.work_dir().display());
    println!("Output file:  {}", files.output_file.display());
    println!("Temp file:    {}", files.temp_file.display());
    println!("Thread log:   {}", files.thread_log_file.display());
    println!("Logs dir:     {}", paths.logs_dir().display());
    Ok(())
}
