mod food;
mod helpers;
mod log;
mod session;
mod summary;

pub(crate) use food::{cmd_food_add, cmd_food_delete, cmd_food_edit, cmd_food_list};
pub(crate) use log::{cmd_delete, cmd_log, cmd_update};
pub(crate) use session::{
    cmd_exercise_add, cmd_exercise_delete, cmd_exercise_edit, cmd_session_add, cmd_session_delete,
    cmd_session_edit, cmd_session_list, cmd_session_show,
};
pub(crate) use summary::{cmd_prune, cmd_summary, cmd_trend};
