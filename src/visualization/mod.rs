pub mod trajectory_vis3d;
