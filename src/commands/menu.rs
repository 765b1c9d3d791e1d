use crate::commands::batch::{collect_batch, run_batch};
use crate::core::config::Config;
use crate::core::download::{DownloadRequest, Downloader};
use crate::core::quality::Quality;
use crate::core::url::is_valid_post_url;
use crate::error::Result;
use crate::utils::console::Console;
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Menu,
    DownloadSingle,
    InfoSingle,
    BatchCollect,
    Exit,
}

impl MenuState {
    /// State selected by a menu answer, or `None` for an unknown option.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuState::DownloadSingle),
            "2" => Some(MenuState::InfoSingle),
            "3" => Some(MenuState::BatchCollect),
            "0" => Some(MenuState::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    console: Console<R, W>,
    downloader: &'a Downloader<'a>,
    config: &'a Config,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(console: Console<R, W>, downloader: &'a Downloader<'a>, config: &'a Config) -> Self {
        Self {
            console,
            downloader,
            config,
        }
    }

    /// Runs until the user picks `0` or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        let mut state = MenuState::Menu;
        loop {
            log::trace!("menu state: {state:?}");
            state = match state {
                MenuState::Menu => self.choose()?,
                MenuState::DownloadSingle => {
                    self.download_single()?;
                    MenuState::Menu
                }
                MenuState::InfoSingle => {
                    self.info_single()?;
                    MenuState::Menu
                }
                MenuState::BatchCollect => {
                    self.batch()?;
                    MenuState::Menu
                }
                MenuState::Exit => {
                    writeln!(self.console.out(), "\n ¡Hasta luego!")?;
                    return Ok(());
                }
            };
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn print_banner(&mut self) -> Result<()> {
        let out = self.console.out();
        let rule = "=".repeat(55);
        writeln!(out, "{rule}")?;
        writeln!(out, "        Twitter/X Video Downloader ")?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;
        Ok(())
    }

    fn choose(&mut self) -> Result<MenuState> {
        let out = self.console.out();
        writeln!(out, "\n¿Qué deseas hacer?")?;
        writeln!(out, "  [1] Descargar un video")?;
        writeln!(out, "  [2] Ver información de un video")?;
        writeln!(out, "  [3] Descargar varios videos (batch)")?;
        writeln!(out, "  [0] Salir")?;

        let Some(choice) = self.console.prompt("\nOpción: ")? else {
            return Ok(MenuState::Exit);
        };

        match MenuState::from_choice(&choice) {
            Some(state) => Ok(state),
            None => {
                writeln!(self.console.out(), "Opción no válida.")?;
                Ok(MenuState::Menu)
            }
        }
    }

    /// Reads a post URL; prints `rejection` and returns `None` if it is invalid.
    fn read_post_url(&mut self, rejection: &str) -> Result<Option<String>> {
        let Some(url) = self.console.prompt("\nPega la URL del tweet: ")? else {
            return Ok(None);
        };
        if !is_valid_post_url(&url) {
            writeln!(self.console.out(), "{rejection}")?;
            return Ok(None);
        }
        Ok(Some(url))
    }

    fn read_destination(&mut self) -> Result<PathBuf> {
        let default = self.config.default_destination.display().to_string();
        let answer = self
            .console
            .prompt_or(&format!("Carpeta destino (Enter = '{default}'): "), &default)?;
        Ok(PathBuf::from(answer))
    }

    fn download_single(&mut self) -> Result<()> {
        let Some(url) =
            self.read_post_url("  La URL no parece ser de Twitter/X. Intenta de nuevo.")?
        else {
            return Ok(());
        };

        writeln!(
            self.console.out(),
            "\nCalidad: [1] Mejor  [2] 720p  [3] 480p  [4] 360p  [5] Peor"
        )?;
        let choice = self.console.prompt_or("Elige calidad (Enter = mejor): ", "1")?;
        let quality = Quality::from_menu_choice(&choice);

        let destination = self.read_destination()?;
        let request = DownloadRequest::new(url, destination, quality);
        self.downloader.download(&request, self.console.out())?;
        Ok(())
    }

    fn info_single(&mut self) -> Result<()> {
        if let Some(url) = self.read_post_url("  La URL no parece ser de Twitter/X.")? {
            self.downloader.show_info(&url, self.console.out())?;
        }
        Ok(())
    }

    fn batch(&mut self) -> Result<()> {
        let batch = collect_batch(&mut self.console)?;
        if batch.is_empty() {
            writeln!(self.console.out(), "No se ingresaron URLs válidas.")?;
            return Ok(());
        }

        let destination = self.read_destination()?;
        run_batch(
            self.downloader,
            &batch,
            &destination,
            self.config.quality(),
            self.console.out(),
        )?;
        Ok(())
    }
}
