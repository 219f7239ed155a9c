use minefield_core::*;

fn press(ctl: &mut GameController, command: Command, times: usize) {
    for _ in 0..times {
        ctl.handle(command).unwrap();
    }
}

fn move_to(ctl: &mut GameController, (x, y): Coord2) {
    let (cx, cy) = ctl.cursor();
    press(ctl, Command::MoveLeft, cx.saturating_sub(x).into());
    press(ctl, Command::MoveRight, x.saturating_sub(cx).into());
    press(ctl, Command::MoveUp, cy.saturating_sub(y).into());
    press(ctl, Command::MoveDown, y.saturating_sub(cy).into());
}

fn next_hidden_safe(board: &Board) -> Option<Coord2> {
    board
        .cells()
        .indexed_iter()
        .find(|(_, cell)| !cell.has_mine && !cell.is_revealed)
        .map(|((y, x), _)| (x as Coord, y as Coord))
}

/// Plays a round to victory with full knowledge of the mines, flagging every mine after the first reveal.
fn play_perfect_round(ctl: &mut GameController) {
    let (width, height) = ctl.board().unwrap().size();
    move_to(ctl, (width / 2, height / 2));
    ctl.handle(Command::Select).unwrap();

    if ctl.phase() == Phase::Playing {
        let mines: Vec<_> = ctl.board().unwrap().mines().collect();
        for &mine in &mines {
            move_to(ctl, mine);
            ctl.handle(Command::Flag).unwrap();
        }
        assert_eq!(ctl.remaining_mines(), 0);
    }

    while ctl.phase() == Phase::Playing {
        let before = ctl.state().cells_revealed();
        let target = next_hidden_safe(ctl.board().unwrap()).unwrap();
        move_to(ctl, target);
        ctl.handle(Command::Select).unwrap();
        assert!(ctl.state().cells_revealed() > before);
    }
}

#[test]
fn every_preset_can_be_won() {
    let mut ctl = GameController::with_seed(DifficultySet::presets(), 2024);

    for (index, difficulty) in DifficultySet::presets().iter().enumerate() {
        press(&mut ctl, Command::MoveDown, index);
        assert_eq!(ctl.handle(Command::Select).unwrap(), Phase::Playing);

        play_perfect_round(&mut ctl);

        assert_eq!(ctl.phase(), Phase::Won);
        let board = ctl.board().unwrap();
        assert!(board.is_solved());
        assert_eq!(
            board.revealed_count(),
            difficulty.total_cells() - difficulty.mine_count()
        );
        assert_eq!(ctl.state().cells_revealed(), difficulty.safe_cells());
        assert_eq!(board.flag_count(), ctl.state().flags_placed());

        assert_eq!(ctl.handle(Command::Select).unwrap(), Phase::Menu);
    }

    press(&mut ctl, Command::MoveDown, 3);
    assert_eq!(ctl.handle(Command::Select).unwrap(), Phase::Exited);
}

#[test]
fn balanced_rounds_play_out() {
    let mut ctl = GameController::with_seed(vec![Difficulty::expert()], 99)
        .with_strategy(GenerationStrategy::Balanced { max_attempts: 20 });
    ctl.handle(Command::Select).unwrap();

    play_perfect_round(&mut ctl);

    assert_eq!(ctl.phase(), Phase::Won);
}

#[test]
fn configured_difficulties_drive_the_menu() {
    let set = DifficultySet::from_json(
        r#"[{"name": "Pocket", "width": 6, "height": 5, "mine_count": 4}]"#,
    )
    .unwrap();
    let mut ctl = GameController::with_seed(set, 1);

    assert_eq!(ctl.menu_options(), vec!["Pocket", "Exit"]);
    ctl.handle(Command::Select).unwrap();
    play_perfect_round(&mut ctl);

    let snapshot = Snapshot::from_controller(&ctl);
    assert_eq!(snapshot.phase, Phase::Won);
    assert_eq!(snapshot.cells.unwrap().dim(), (5, 6));
}

#[test]
fn losing_then_replaying() {
    let mut ctl = GameController::with_seed(vec![Difficulty::beginner()], 3);
    ctl.handle(Command::Select).unwrap();
    move_to(&mut ctl, (4, 4));
    ctl.handle(Command::Select).unwrap();

    if ctl.phase() == Phase::Playing {
        let mine = ctl.board().unwrap().mines().last().unwrap();
        move_to(&mut ctl, mine);
        assert_eq!(ctl.handle(Command::Select).unwrap(), Phase::Lost);
        let board = ctl.board().unwrap();
        assert!(board.mines().all(|coords| board.cell_at(coords).unwrap().is_revealed));
    }

    assert!(ctl.restart_current_game());
    assert_eq!(ctl.phase(), Phase::Playing);
    assert!(!ctl.board().unwrap().is_initialized());
}
