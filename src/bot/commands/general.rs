//! General Discord commands - ping and help.
//! These commands don't touch the store or the user's session.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**FinanceBuddy - Ajuda**\n\
        Controle suas receitas e despesas direto pelo Discord.\n\n\
        **Sessão**\n\
        • `/login` - Entra com sua conta do Discord e mostra seu dashboard.\n\
        • `/logout` - Sai da sua conta.\n\n\
        **Lançamentos**\n\
        • `/lancamento <descricao> <valor> <tipo> <pagamento> [data] [categoria]`\n  \
        Registra uma receita ou despesa.\n\
        • `/dashboard` - Despesas por categoria e receitas x despesas dos últimos meses.\n\n\
        **Utilidades**\n\
        • `/ping` - Verifica se o bot está respondendo.\n\
        • `/help` - Mostra esta mensagem.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
