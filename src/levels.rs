//! Built-in level plans

/// Starter level: a moving hazard, two coins and a lava pit
pub const SIMPLE: &str = "
......................
..#................#..
..#..............=.#..
..#.........o.o....#..
..#.@......#####...#..
..#####............#..
......#++++++++++++#..
......##############..
......................";

/// A chaser patrols the floor while drips fall from the ceiling
pub const CAVERN: &str = "
############################
#..........v.......v.......#
#..........................#
#..o...........o........o..#
#.....####.........####....#
#..........................#
#.@..................M.....#
#######++++####++++#########
############################";

/// All built-in plans in play order
pub fn all() -> [&'static str; 2] {
    [SIMPLE, CAVERN]
}
