use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use basetrace_analysis::{
    feed::FeedGame,
    trace::{CorruptPlayPolicy, Game, GameTrace, Reconstructor, reconstruct_games},
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a live game feed and convert it into a play sequence
pub fn read_game_file<P>(path: P) -> anyhow::Result<Game>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let feed: FeedGame = read_json_file("game feed", path)?;
    if !feed.is_final() {
        log::warn!(
            "game {} is not final ({}); walk-off labels may be missing",
            feed.game_pk,
            path.display()
        );
    }
    let game = Game::try_from(feed)
        .with_context(|| format!("Failed to convert game feed: {}", path.display()))?;
    log::debug!(
        "loaded game {} with {} plays from {}",
        game.game_pk,
        game.plays.len(),
        path.display()
    );
    Ok(game)
}

pub fn read_game_files(paths: &[PathBuf]) -> anyhow::Result<Vec<Game>> {
    paths.iter().map(read_game_file).collect()
}

/// Reconstruct every game and keep the ones that succeeded
///
/// Failures are logged with the game id and the failing play and sub-event. The returned
/// `usize` is the number of failed games.
pub fn reconstruct_all(
    games: &[Game],
    policy: CorruptPlayPolicy,
) -> (Vec<(u64, GameTrace)>, usize) {
    let reconstructor = Reconstructor::new(policy);
    let mut traces = vec![];
    let mut failures = 0;
    for outcome in reconstruct_games(&reconstructor, games) {
        match outcome.result {
            Ok(trace) => traces.push((outcome.game_pk, trace)),
            Err(err) => {
                log::error!("game {}: {err}", outcome.game_pk);
                failures += 1;
            }
        }
    }
    log::info!(
        "reconstructed {} of {} games",
        traces.len(),
        games.len()
    );
    (traces, failures)
}

pub fn ensure_no_failures(failures: usize, total: usize) -> anyhow::Result<()> {
    if failures > 0 {
        bail!("{failures} of {total} games failed reconstruction");
    }
    Ok(())
}
