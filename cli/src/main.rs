use clap::{Parser, Subcommand};
use coursely::model::{DatabaseError, DbConnection, ModelManager};
use coursely::model::entity::Purchase;
use coursely::web::AuthenticatedUser;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the coursely DB", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage lectures
    Lecture {
        #[command(subcommand)]
        action: LectureCommands,
    },

    /// Manage quizzes
    Quiz {
        #[command(subcommand)]
        action: QuizCommands,
    },

    /// Manage purchases
    Purchase {
        #[command(subcommand)]
        action: PurchaseCommands,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        title: String,
    },
}

/// Lecture management
#[derive(Subcommand, Debug)]
pub enum LectureCommands {
    Add {
        /// Course title to attach the lecture to
        #[arg(long)]
        course_title: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        media_url: String,
        #[arg(long, default_value_t = false)]
        free_preview: bool,
        #[arg(long, default_value_t = 0)]
        position: i32,
    },
}

/// Quiz management
#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    AddQuestion {
        /// Quiz title to attach the question to
        #[arg(long)]
        quiz_title: String,
        #[arg(long)]
        question: String,
        /// Exactly four options
        #[arg(long, num_args = 4)]
        options: Vec<String>,
        #[arg(long)]
        correct_index: i32,
    },
}

/// Purchase management
#[derive(Subcommand, Debug)]
pub enum PurchaseCommands {
    Grant {
        #[arg(long)]
        user_id: Uuid,
        /// Course title to unlock
        #[arg(long)]
        course_title: String,
    },
}

#[tokio::main]
async fn main() -> coursely::error::AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let db_con = DbConnection::connect(&std::env::var("DATABASE_URL").unwrap())?;
    let mm = ModelManager::new(db_con);
    let actor = AuthenticatedUser::system();

    match args.command {
        Commands::Course { action } => match action {
            CourseCommands::Add { title } => {
                let id: Uuid =
                    sqlx::query_scalar("INSERT INTO courses (id, title) VALUES ($1, $2) RETURNING id")
                        .bind(Uuid::new_v4())
                        .bind(&title)
                        .fetch_one(mm.executor())
                        .await
                        .map_err(DatabaseError::SqlxError)?;
                println!("Course created: {id} ({title})");
            }
        },

        Commands::Lecture { action } => match action {
            LectureCommands::Add {
                course_title,
                title,
                media_url,
                free_preview,
                position,
            } => {
                let course_id: Uuid = sqlx::query_scalar("SELECT id FROM courses WHERE title = $1")
                    .bind(&course_title)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::SqlxError)?;

                let id: Uuid = sqlx::query_scalar(
                    "INSERT INTO lectures (id, course_id, title, media_url, free_preview, position) \
                     VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
                )
                .bind(Uuid::new_v4())
                .bind(course_id)
                .bind(&title)
                .bind(&media_url)
                .bind(free_preview)
                .bind(position)
                .fetch_one(mm.executor())
                .await
                .map_err(DatabaseError::SqlxError)?;
                println!("Lecture created: {id} ({title})");
            }
        },

        Commands::Quiz { action } => match action {
            QuizCommands::Add {
                title,
                category,
                description,
            } => {
                let id: Uuid = sqlx::query_scalar(
                    "INSERT INTO quiz_sets (id, title, category, description) \
                     VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(Uuid::new_v4())
                .bind(&title)
                .bind(&category)
                .bind(&description)
                .fetch_one(mm.executor())
                .await
                .map_err(DatabaseError::SqlxError)?;
                println!("Quiz created: {id} ({title})");
            }
            QuizCommands::AddQuestion {
                quiz_title,
                question,
                options,
                correct_index,
            } => {
                let quiz_id: Uuid = sqlx::query_scalar("SELECT id FROM quiz_sets WHERE title = $1")
                    .bind(&quiz_title)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::SqlxError)?;

                let id: Uuid = sqlx::query_scalar(
                    "INSERT INTO quiz_questions (id, quiz_id, question, options, correct_index) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING id",
                )
                .bind(Uuid::new_v4())
                .bind(quiz_id)
                .bind(&question)
                .bind(&options)
                .bind(correct_index)
                .fetch_one(mm.executor())
                .await
                .map_err(DatabaseError::SqlxError)?;
                println!("Question created: {id}");
            }
        },

        Commands::Purchase { action } => match action {
            PurchaseCommands::Grant {
                user_id,
                course_title,
            } => {
                let course_id: Uuid = sqlx::query_scalar("SELECT id FROM courses WHERE title = $1")
                    .bind(&course_title)
                    .fetch_one(mm.executor())
                    .await
                    .map_err(DatabaseError::SqlxError)?;

                let purchase = Purchase::grant(&mm, &actor, user_id, course_id).await?;
                println!(
                    "Purchase granted: user {} -> course {}",
                    purchase.user_id(),
                    purchase.course_id()
                );
            }
        },
    }

    Ok(())
}
