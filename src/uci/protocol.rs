use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use vampirc_uci::uci::{UciSearchControl, UciTimeControl};
use vampirc_uci::{parser, UciMessage};

use crate::core::board::{Board, Color};
use crate::core::moves::Move;
use crate::core::position::Position;
use crate::engine::api::{Engine, EngineConfig};
use crate::engine::difficulty::{MAX_LEVEL, MIN_LEVEL};
use crate::engine::movegen::perft;
use crate::engine::search::{is_mate_score, SearchLimits, SearchResult, MATE_SCORE};

pub struct UCI {
    pub board: Board,
    engine: Engine,
}

impl UCI {
    pub fn new() -> Self {
        UCI {
            board: Board::startpos(),
            engine: Engine::default(),
        }
    }

    pub fn with_config(config: EngineConfig) -> crate::error::EngineResult<Self> {
        Ok(UCI {
            board: Board::startpos(),
            engine: Engine::new(config)?,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match self.handle_line(&line, &mut stdout) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    log::warn!("stdout write failed: {e}");
                    break;
                }
            }
        }
    }

    /// Process one input line. Returns `Ok(false)` once `quit` is read.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();

        // 4×5 placements are not standard FEN, so positions never go through
        // the generic parser
        if parts[0] == "position" {
            self.cmd_position(&parts, out)?;
            out.flush()?;
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => writeln!(out, "readyok")?,
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref(), out)?;
            }
            UciMessage::UciNewGame => self.cmd_ucinewgame(),
            UciMessage::Go {
                time_control,
                search_control,
            } => {
                let limits = go_to_limits(time_control.as_ref(), search_control.as_ref());
                self.do_go(&limits, out)?;
            }
            // searches are synchronous, nothing is running by the time stop arrives
            UciMessage::Stop => {}
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                match parts.first().copied() {
                    Some("d") | Some("display") => self.cmd_display(out)?,
                    Some("eval") => self.cmd_eval(out)?,
                    Some("quality") => self.cmd_quality(&parts, out)?,
                    Some("stats") => self.cmd_stats(out)?,
                    Some("perft") => self.cmd_perft(&parts, out)?,
                    _ => {}
                }
            }
            _ => {}
        }
        out.flush()?;
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name micro_chess {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author micro_chess developers")?;
        writeln!(out)?;
        writeln!(
            out,
            "option name Difficulty type spin default {} min {} max {}",
            self.engine.difficulty(),
            MIN_LEVEL,
            MAX_LEVEL
        )?;
        writeln!(
            out,
            "option name MoveTime type spin default {} min 1 max 60000",
            self.engine.time_budget().as_millis()
        )?;
        writeln!(out, "option name ClearCache type button")?;
        writeln!(out, "uciok")
    }

    fn apply_setoption<W: Write>(
        &mut self,
        name: &str,
        value: Option<&str>,
        out: &mut W,
    ) -> io::Result<()> {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        match opt.as_str() {
            "difficulty" => match value.parse::<u8>() {
                Ok(level) => {
                    if let Err(e) = self.engine.set_difficulty(level) {
                        writeln!(out, "info string {e}")?;
                    }
                }
                Err(_) => writeln!(out, "info string invalid difficulty value '{value}'")?,
            },
            "movetime" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.engine.set_time_budget(Duration::from_millis(ms.max(1)));
                }
            }
            "clearcache" => self.engine.clear_cache(),
            _ => writeln!(out, "info string unknown option '{name}'")?,
        }
        Ok(())
    }

    pub fn cmd_ucinewgame(&mut self) {
        self.board = Board::startpos();
        self.engine.clear_cache();
    }

    /// `position startpos|fen <placement> <side> [fullmove] [moves ...]`
    pub fn cmd_position<W: Write>(&mut self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let mut idx = 1;
        let mut board = match parts.get(idx) {
            Some(&"startpos") => {
                idx += 1;
                Board::startpos()
            }
            Some(&"fen") => {
                idx += 1;
                let start = idx;
                while idx < parts.len() && parts[idx] != "moves" {
                    idx += 1;
                }
                match Board::from_fen(&parts[start..idx].join(" ")) {
                    Ok(board) => board,
                    Err(e) => return writeln!(out, "info string {e}"),
                }
            }
            _ => return writeln!(out, "info string expected 'startpos' or 'fen'"),
        };

        if parts.get(idx) == Some(&"moves") {
            for &s in &parts[idx + 1..] {
                match board.parse_move(s) {
                    Some(mv) => board.make_move(mv),
                    None => return writeln!(out, "info string illegal move '{s}'"),
                }
            }
        }

        self.board = board;
        Ok(())
    }

    fn do_go<W: Write>(&mut self, limits: &SearchLimits, out: &mut W) -> io::Result<()> {
        let result = self.engine.search(&self.board, limits);
        self.report_info(&result, out)?;
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {}", mv.to_uci()),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    fn report_info<W: Write>(&self, result: &SearchResult, out: &mut W) -> io::Result<()> {
        // UCI scores are from the mover's side, the engine reports White's
        let score = match self.board.side_to_move() {
            Color::White => result.score,
            Color::Black => -result.score,
        };
        writeln!(
            out,
            "info depth {} score {} nodes {} time {}",
            result.max_depth_reached,
            format_score(score),
            result.nodes_evaluated,
            result.elapsed.as_millis()
        )
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.board)
    }

    fn cmd_eval<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let score = self.engine.evaluate_position(&self.board);
        writeln!(out, "Evaluation: {} cp", score)?;
        writeln!(out, "(Positive = White advantage)")
    }

    fn cmd_quality<W: Write>(&self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let Some((from, to, _)) = parts.get(1).and_then(|s| Move::parse_parts(s)) else {
            return writeln!(out, "info string usage: quality <move>");
        };
        match self.engine.get_move_quality(&self.board, from, to) {
            Ok(quality) => writeln!(out, "quality {quality}"),
            Err(e) => writeln!(out, "info string {e}"),
        }
    }

    fn cmd_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let stats = self.engine.get_calculation_stats();
        writeln!(
            out,
            "stats nodes_evaluated {} max_depth_reached {} difficulty {} search_depth {}",
            stats.nodes_evaluated, stats.max_depth_reached, stats.difficulty_level, stats.search_depth
        )?;
        let cache = self.engine.cache_stats();
        for (name, tier) in [("positions", cache.positions), ("moves", cache.moves)] {
            writeln!(
                out,
                "cache {} size {} capacity {} hits {} misses {} hitrate {:.3}",
                name,
                tier.size,
                tier.capacity,
                tier.hits,
                tier.misses,
                tier.hit_rate()
            )?;
        }
        Ok(())
    }

    fn cmd_perft<W: Write>(&self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let start = Instant::now();
        let mut board = self.board.clone();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed();
        let nps = if elapsed.as_millis() > 0 {
            nodes as u128 * 1000 / elapsed.as_millis()
        } else {
            0
        };
        writeln!(out, "Nodes: {} ({} ms, {} nps)", nodes, elapsed.as_millis(), nps)
    }
}

/// Build SearchLimits from a vampirc-parsed go command
fn go_to_limits(
    time_control: Option<&UciTimeControl>,
    search_control: Option<&UciSearchControl>,
) -> SearchLimits {
    let mut limits = SearchLimits::default();

    if let Some(sc) = search_control {
        limits.depth = sc.depth.map(u32::from);
    }

    if let Some(UciTimeControl::MoveTime(d)) = time_control {
        let ms = d.num_milliseconds().max(1) as u64;
        limits.movetime = Some(Duration::from_millis(ms));
    }

    limits
}

fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        format!("mate {}", if score > 0 { moves } else { -moves })
    } else {
        format!("cp {}", score)
    }
}

impl Default for UCI {
    fn default() -> Self {
        Self::new()
    }
}
